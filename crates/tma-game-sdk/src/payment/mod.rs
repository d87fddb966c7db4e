// ============================================================================
// TMA-GAME-SDK - Payment Dispatchers
// ============================================================================
// One dispatcher per payment rail. They share nothing but the project id.
// ============================================================================

pub mod star;
pub mod ton;

pub use star::{StarInvoice, StarInvoiceRequest, StarPayment};
pub use ton::TonPayment;
