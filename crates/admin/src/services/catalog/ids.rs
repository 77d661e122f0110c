//! Product identifier generation.
//!
//! The default format is four lowercase hex characters. That space only holds
//! 65,536 ids, so the catalog checks every candidate against the ids stored at
//! the moment of insertion and draws again on collision (see [`allocate`]).

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;

use rand::Rng;

use slooze_core::ProductId;

/// Candidate draws before allocation gives up.
pub const MAX_ID_ATTEMPTS: usize = 64;

/// Source of candidate product ids.
///
/// Candidates need not be unique: the catalog rejects ones already in use.
pub trait IdGenerator: Send + Sync {
    /// Produce a candidate id.
    fn generate(&self) -> ProductId;
}

/// Four random lowercase hex characters, e.g. `"0f3a"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexIdGenerator;

impl IdGenerator for HexIdGenerator {
    fn generate(&self) -> ProductId {
        let value: u16 = rand::rng().random();
        ProductId::new(format!("{value:04x}"))
    }
}

/// Hyphenated random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn generate(&self) -> ProductId {
        ProductId::new(uuid::Uuid::new_v4().to_string())
    }
}

/// Configurable id format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdFormat {
    /// [`HexIdGenerator`].
    #[default]
    Hex,
    /// [`UuidIdGenerator`].
    Uuid,
}

impl IdFormat {
    /// Generator producing this format.
    #[must_use]
    pub fn generator(self) -> Arc<dyn IdGenerator> {
        match self {
            Self::Hex => Arc::new(HexIdGenerator),
            Self::Uuid => Arc::new(UuidIdGenerator),
        }
    }
}

impl FromStr for IdFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hex" => Ok(Self::Hex),
            "uuid" => Ok(Self::Uuid),
            other => Err(format!("unknown id format '{other}' (expected hex or uuid)")),
        }
    }
}

/// Draw ids until one is not in `taken`.
///
/// Returns `None` after [`MAX_ID_ATTEMPTS`] collisions.
pub fn allocate(generator: &dyn IdGenerator, taken: &HashSet<&ProductId>) -> Option<ProductId> {
    for attempt in 1..=MAX_ID_ATTEMPTS {
        let candidate = generator.generate();
        if !taken.contains(&candidate) {
            return Some(candidate);
        }
        tracing::debug!(%candidate, attempt, "product id collision, drawing again");
    }
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Replays a fixed list of ids, then repeats the last one.
    struct Scripted(Mutex<Vec<&'static str>>);

    impl IdGenerator for Scripted {
        fn generate(&self) -> ProductId {
            let mut ids = self.0.lock().unwrap();
            let next = if ids.len() > 1 { ids.remove(0) } else { ids[0] };
            ProductId::new(next)
        }
    }

    #[test]
    fn test_hex_ids_are_four_lowercase_hex_chars() {
        for _ in 0..200 {
            let id = HexIdGenerator.generate();
            assert_eq!(id.as_str().len(), 4);
            assert!(
                id.as_str()
                    .chars()
                    .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
            );
        }
    }

    #[test]
    fn test_uuid_ids_parse() {
        let id = UuidIdGenerator.generate();
        assert!(uuid::Uuid::parse_str(id.as_str()).is_ok());
    }

    #[test]
    fn test_allocate_skips_taken_ids() {
        let generator = Scripted(Mutex::new(vec!["aaaa", "bbbb", "cccc"]));
        let aaaa = ProductId::new("aaaa");
        let bbbb = ProductId::new("bbbb");
        let taken: HashSet<_> = [&aaaa, &bbbb].into_iter().collect();

        assert_eq!(allocate(&generator, &taken), Some(ProductId::new("cccc")));
    }

    #[test]
    fn test_allocate_gives_up() {
        let generator = Scripted(Mutex::new(vec!["aaaa"]));
        let aaaa = ProductId::new("aaaa");
        let taken: HashSet<_> = [&aaaa].into_iter().collect();

        assert_eq!(allocate(&generator, &taken), None);
    }

    #[test]
    fn test_id_format_from_str() {
        assert_eq!("hex".parse::<IdFormat>().unwrap(), IdFormat::Hex);
        assert_eq!("UUID".parse::<IdFormat>().unwrap(), IdFormat::Uuid);
        assert!("serial".parse::<IdFormat>().is_err());
    }
}
