//! External collaborators: HTTP retrieval, site scraping, the performer
//! database client and the translation seam.

pub mod http;
pub mod iafd;
pub mod scrape;
pub mod translate;
