pub mod qr_request;
pub mod session;
