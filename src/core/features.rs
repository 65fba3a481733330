use md5::{Digest, Md5};
use thiserror::Error;

/// Default number of hash buckets for airport codes
pub const DEFAULT_NUM_BUCKETS: usize = 100;

/// Delays below this many minutes are considered on time
pub const MODERATE_DELAY_MINUTES: f64 = 15.0;

/// Delays at or above this many minutes are considered severe
pub const SEVERE_DELAY_MINUTES: f64 = 60.0;

/// Errors raised while turning raw inputs into model features
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Coarse delay classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DelayCategory {
    /// Under 15 minutes (including early arrivals)
    OnTime = 0,
    /// 15 to 60 minutes
    Moderate = 1,
    /// 60 minutes or more
    Severe = 2,
}

impl DelayCategory {
    /// Ordinal used on the wire
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Hash an airport code into a bucket index in `[0, num_buckets)`
///
/// The code's bytes are hashed with MD5, the 128-bit digest is read as a
/// big-endian integer and reduced modulo `num_buckets`. Hashing is
/// case-sensitive; callers normalize case beforehand.
pub fn encode_airport(code: &str, num_buckets: usize) -> Result<usize, FeatureError> {
    if num_buckets == 0 {
        return Err(FeatureError::InvalidInput(
            "number of buckets must be at least 1".to_string(),
        ));
    }

    let digest = Md5::digest(code.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest);

    let bucket = u128::from_be_bytes(bytes) % num_buckets as u128;
    Ok(bucket as usize)
}

/// Map a delay in minutes to its category
///
/// Thresholds are half-open: `< 15` on time, `[15, 60)` moderate, `>= 60` severe.
#[inline]
pub fn categorize_delay(minutes: f64) -> DelayCategory {
    if minutes >= SEVERE_DELAY_MINUTES {
        DelayCategory::Severe
    } else if minutes >= MODERATE_DELAY_MINUTES {
        DelayCategory::Moderate
    } else {
        DelayCategory::OnTime
    }
}
