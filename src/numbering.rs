use std::collections::HashSet;
use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::FeedError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ChannelNumber(u16);

impl ChannelNumber {
    pub const MIN: u16 = 1;
    pub const MAX: u16 = 9999;

    pub fn new(value: u16) -> Result<Self, FeedError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(FeedError::ChannelNumberRange(value));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    pub fn wrapping_next(self) -> Self {
        Self(self.0 % Self::MAX + 1)
    }
}

impl fmt::Display for ChannelNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for ChannelNumber {
    type Error = FeedError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChannelNumber> for u16 {
    fn from(value: ChannelNumber) -> Self {
        value.0
    }
}

pub fn stable_number(key: &str) -> ChannelNumber {
    let digest = Sha256::digest(key.as_bytes());
    let prefix = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    ChannelNumber((prefix % u32::from(ChannelNumber::MAX)) as u16 + 1)
}

pub trait NumberSource: Send {
    fn draw(&mut self) -> ChannelNumber;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EntropySource;

impl NumberSource for EntropySource {
    fn draw(&mut self) -> ChannelNumber {
        ChannelNumber(rand::thread_rng().gen_range(ChannelNumber::MIN..=ChannelNumber::MAX))
    }
}

pub enum Numbering<'a> {
    Stable,
    Random(&'a mut dyn NumberSource),
}

pub struct Numberer<'a> {
    numbering: Numbering<'a>,
    used: HashSet<u16>,
}

impl<'a> Numberer<'a> {
    pub fn new(numbering: Numbering<'a>) -> Self {
        Self {
            numbering,
            used: HashSet::new(),
        }
    }

    pub fn stable() -> Self {
        Numberer::new(Numbering::Stable)
    }

    pub fn random(source: &'a mut dyn NumberSource) -> Numberer<'a> {
        Numberer::new(Numbering::Random(source))
    }

    pub fn assign(&mut self, key: &str) -> Result<ChannelNumber, FeedError> {
        if self.used.len() >= usize::from(ChannelNumber::MAX) {
            return Err(FeedError::NumberSpaceExhausted);
        }
        let mut candidate = match &mut self.numbering {
            Numbering::Stable => stable_number(key),
            Numbering::Random(source) => source.draw(),
        };
        while !self.used.insert(candidate.get()) {
            candidate = candidate.wrapping_next();
        }
        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    struct ScriptedSource(Vec<u16>);

    impl NumberSource for ScriptedSource {
        fn draw(&mut self) -> ChannelNumber {
            ChannelNumber::new(self.0.remove(0)).unwrap()
        }
    }

    #[test]
    fn channel_number_bounds() {
        assert_matches!(ChannelNumber::new(0), Err(FeedError::ChannelNumberRange(0)));
        assert_matches!(
            ChannelNumber::new(10_000),
            Err(FeedError::ChannelNumberRange(10_000))
        );
        assert_eq!(ChannelNumber::new(1).unwrap().get(), 1);
        assert_eq!(ChannelNumber::new(9999).unwrap().get(), 9999);
    }

    #[test]
    fn wrapping_next_rolls_over() {
        assert_eq!(ChannelNumber::new(42).unwrap().wrapping_next().get(), 43);
        assert_eq!(ChannelNumber::new(9999).unwrap().wrapping_next().get(), 1);
    }

    #[test]
    fn stable_number_known_values() {
        // Derived from the SHA-256 test vectors: first 32 digest bits mod 9999, plus one.
        assert_eq!(stable_number("test").get(), 214);
        assert_eq!(stable_number("").get(), 4650);
        assert_eq!(stable_number("hello world").get(), 2317);
    }

    #[test]
    fn stable_number_is_deterministic() {
        for key in ["Willow HD", "Sky Sports Cricket", "c7", "日本語"] {
            assert_eq!(stable_number(key), stable_number(key));
        }
    }

    #[test]
    fn stable_number_spreads_over_the_range() {
        let numbers: HashSet<u16> = (0..2000)
            .map(|index| stable_number(&format!("channel-{index}")).get())
            .collect();

        // 2000 uniform draws over 9999 slots land on roughly 1800 distinct values.
        assert!(numbers.len() > 1600);
        assert!(numbers.iter().min().unwrap() < &500);
        assert!(numbers.iter().max().unwrap() > &9500);
    }

    #[test]
    fn assign_walks_past_collisions() {
        let mut source = ScriptedSource(vec![5, 5, 5, 9999, 9999]);
        let mut numberer = Numberer::random(&mut source);
        assert_eq!(numberer.assign("a").unwrap().get(), 5);
        assert_eq!(numberer.assign("b").unwrap().get(), 6);
        assert_eq!(numberer.assign("c").unwrap().get(), 7);
        assert_eq!(numberer.assign("d").unwrap().get(), 9999);
        assert_eq!(numberer.assign("e").unwrap().get(), 1);
    }

    #[test]
    fn assign_stable_duplicate_keys_stay_unique() {
        let mut numberer = Numberer::stable();
        let first = numberer.assign("Willow HD").unwrap();
        let second = numberer.assign("Willow HD").unwrap();
        assert_ne!(first, second);
        assert_eq!(second.get(), first.wrapping_next().get());
    }

    #[test]
    fn assign_fails_once_space_is_exhausted() {
        let mut numberer = Numberer::stable();
        for index in 0..9999 {
            numberer.assign(&format!("key-{index}")).unwrap();
        }
        let err = numberer.assign("one-too-many").unwrap_err();
        assert_matches!(err, FeedError::NumberSpaceExhausted);
    }

    #[test]
    fn entropy_source_stays_in_range() {
        let mut source = EntropySource;
        for _ in 0..1000 {
            let value = source.draw().get();
            assert!((ChannelNumber::MIN..=ChannelNumber::MAX).contains(&value));
        }
    }
}
