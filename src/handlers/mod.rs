pub mod customization_handlers;
pub mod health_handlers;
pub mod qr_handlers;
pub mod session_handlers;

#[cfg(test)]
pub mod test_support;
