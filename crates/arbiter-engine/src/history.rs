//! Position history for repetition detection.

use crate::position::Fingerprint;

/// Fingerprints of the positions reached by each executed move, oldest
/// first. The starting position is not recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    fingerprints: Vec<Fingerprint>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fingerprint: Fingerprint) {
        self.fingerprints.push(fingerprint);
    }

    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }

    /// The most recently recorded fingerprint.
    pub fn last(&self) -> Option<&Fingerprint> {
        self.fingerprints.last()
    }

    /// How many times `fingerprint` has been recorded.
    pub fn occurrences(&self, fingerprint: &Fingerprint) -> usize {
        self.fingerprints.iter().filter(|f| *f == fingerprint).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Fingerprint> {
        self.fingerprints.iter()
    }

    pub(crate) fn clear(&mut self) {
        self.fingerprints.clear();
    }
}
