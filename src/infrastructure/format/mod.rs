//! Ticket data formats.
//!
//! Provides [`HmacTicketFormat`], an HMAC-SHA256 signed JSON encoding of
//! [`crate::domain::entities::Ticket`] that implements
//! [`crate::domain::ports::TicketUnprotector`].

mod hmac_ticket_format;

pub use hmac_ticket_format::HmacTicketFormat;
