//! # comchain-read
//!
//! Read-only client for ComChain currency contracts.
//!
//! ## Features
//!
//! - **ComChainReader**: evaluates read-only calls and decodes the results
//! - **abi**: word codec for the handful of return types ComChain uses
//! - **Lists**: paginated reads of allowances, delegations and payment requests
//! - **RemoteReader**: transport seam, with an HTTP JSON-RPC implementation
//!   and an in-memory mock
//!
//! ## Quick Start
//!
//! ```rust
//! use comchain_read::registry::AmountQuery;
//! use comchain_read::types::ContractSet;
//! use comchain_read::{Address, ComChainReader, MockReader, Word};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let wallet = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d")?;
//!
//!     let mock = Arc::new(MockReader::new());
//!     mock.set_response(
//!         AmountQuery::GlobalBalance.selector(),
//!         &[Word::from(&wallet)],
//!         Word::from(1234u64).to_hex(),
//!     );
//!
//!     let contracts = ContractSet {
//!         main: Address::from_bytes([0x11; 20]),
//!         lists: Address::from_bytes([0x22; 20]),
//!     };
//!     let reader = ComChainReader::new(mock, contracts);
//!
//!     let balance = reader.global_balance(&wallet).await?;
//!     assert_eq!(balance.map(|b| b.to_string()), Some("12.34".to_string()));
//!     Ok(())
//! }
//! ```
//!
//! ## Lists
//!
//! ```rust,no_run
//! use comchain_read::registry::ListKind;
//! use comchain_read::{Address, ComChainReader, ReaderConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ReaderConfig::load("reader.toml")?;
//!     let reader = ComChainReader::from_config(&config)?;
//!
//!     let me = Address::from_hex("0x742d35Cc6634C0532925a3b844Bc9e7595f0aB3d")?;
//!     for entry in reader.list(ListKind::Allowance, &me, Some(0), Some(9)).await? {
//!         println!("{} {:?}", entry.address, entry.amount);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
mod config;
mod error;
mod list;
mod reader;
pub mod registry;
mod transport;
pub mod types;

// Re-export main types
pub use config::ReaderConfig;
pub use error::ReadError;
pub use reader::ComChainReader;
pub use transport::{MockReader, TransportError};

/// Re-export RemoteReader trait for custom transports
pub use transport::RemoteReader;

#[cfg(feature = "http")]
pub use transport::HttpReader;

// Re-export primitives for convenience
pub use comchain_primitives::{Address, BlockNumber, Selector, Word, U256};
