pub mod customization;
pub mod qr_request;
pub mod session;
pub mod theme;
