use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;

pub const REFERENCE_PREFIX: &str = "BK-";

/// Source of public booking references, injected into the booking service.
pub trait ReferenceGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// `BK-` followed by 10 uppercase hex digits from the OS random source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureReferenceGenerator;

impl SecureReferenceGenerator {
    fn from_source<R: RngCore>(source: &mut R) -> String {
        let mut buf = [0u8; 5];
        match source.try_fill_bytes(&mut buf) {
            Ok(()) => {
                let hex: String = buf.iter().map(|b| format!("{:02X}", b)).collect();
                format!("{}{}", REFERENCE_PREFIX, hex)
            }
            Err(err) => {
                tracing::warn!(error = %err, "random source failed, using timestamp reference");
                let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
                format!("{}{}", REFERENCE_PREFIX, nanos)
            }
        }
    }
}

impl ReferenceGenerator for SecureReferenceGenerator {
    fn generate(&self) -> String {
        Self::from_source(&mut OsRng)
    }
}
