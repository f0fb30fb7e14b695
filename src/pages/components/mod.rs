mod footer;
mod header;

pub use footer::FooterComponent;
pub use header::HeaderComponent;
