//! # Simple and type-safe client for the DNS Made Easy API.
//!
//! Implements a blocking client for the managed DNS part of the
//! [DNS Made Easy API]: domains and their records can be created, listed,
//! fetched, updated and deleted. Every request is signed with the API secret
//! as the provider requires.
//!
//! ## Examples
//!
//! ```no_run
//! use dnsmadeeasy::record::{Record, Type};
//! use dnsmadeeasy::{Client, Environment};
//!
//! let client = Client::builder()
//!     .api_key("<APIKEY>")
//!     .api_secret("<APISECRET>")
//!     .environment(Environment::Sandbox)
//!     .build()
//!     .unwrap();
//!
//! let domain = client.create_domain("example.com").unwrap();
//! let record = Record::new("www", Type::A, "127.0.0.1", 60);
//! let record = client.add_record(domain.id.unwrap(), &record).unwrap();
//! ```
//!
//! ## Errors
//!
//! Failed operations return a [ClientError]. Responses with a status of 400 or
//! above become [ApiError]s, which are kept apart from transport and decoding
//! failures so that callers can decide what to retry. The client never retries
//! on its own.
//!
//! [DNS Made Easy API]: http://www.dnsmadeeasy.com/wp-content/uploads/2014/07/API-Docv2.pdf

pub mod auth;
mod client;
pub mod domain;
mod errors;
mod payload;
pub mod record;
pub mod transport;

pub use client::*;
pub use errors::*;
pub(crate) use payload::*;
