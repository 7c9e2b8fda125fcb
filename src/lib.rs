//! Reconstruction half of Shamir's Secret Sharing Scheme, over the
//! integers.
//!
//! Shamir A., How to Share a Secret, Communications of the ACM, 22, 1979,
//! pp. 612--613.
//!
//! Shares are points `(x, f(x))` on a polynomial of order `k - 1` whose
//! constant term is the secret. Share values may be written in any radix
//! from 2 to 36 and may be arbitrarily large; everything is decoded into
//! big integers and interpolated with exact rationals, so the secret is
//! either recovered exactly or the failure is reported.
//!
//! ```
//! use ssss_combine::{recover_secret, Config, ShareSet};
//!
//! let set = ShareSet::from_json_str(r#"{
//!     "keys": { "n": 2, "k": 2 },
//!     "1": { "base": 10, "value": "10" },
//!     "2": { "base": 2, "value": "1101" }
//! }"#).unwrap();
//! assert_eq!(recover_secret(&set, &Config::default()).unwrap(), num_bigint::BigInt::from(7));
//! ```

pub mod config;
pub mod decode;
pub mod elimination;
pub mod error;
pub mod lagrange;
pub mod rational;
pub mod shareset;

pub use config::{Config, Selection, Validation};
pub use decode::{decode, parse_radix};
pub use error::{Result, ShareError};
pub use lagrange::{interpolate_at_zero, reconstruct, Point, Reconstruction, SubsetOutcome};
pub use rational::Rational;
pub use shareset::{reconstruct_share_set, recover_secret, Share, ShareSet};
