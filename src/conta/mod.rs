//! Conta (bill/invoice) model for the payable/receivable tracker
//!
//! - Wire types exchanged with the backend
//! - Client-side filtering of a loaded snapshot
//! - pt-BR display formatting

pub mod types;
pub mod filter;
pub mod format;

pub use types::{Conta, ContaId, ContaPayload, Credenciais, MensagemResponse, Tipo};
pub use filter::Filtro;
