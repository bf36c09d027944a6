mod calendar;
mod client;
mod daily;
mod decode;
mod directory;
mod monthly;
mod yearly;

pub use client::PortalClient;
pub use directory::ServiceDirectory;
