// Contact form: visitor message -> EmailJS, with a self-clearing status.
// Runs independently of the portfolio document and never touches it.

pub mod dispatcher;
pub mod handlers;
pub mod transport;
