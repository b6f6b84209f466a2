//! Morph channels - named blendable deformations on a mesh
//!
//! A mesh exposes a dictionary of channel names and a parallel array of
//! influence weights. The blender writes weights through the `MorphTarget`
//! trait so it does not care how a host stores them.

use std::collections::HashMap;

use crate::{VisageError, VisageResult};

/// A writable set of morph channel influences
pub trait MorphTarget {
    /// Number of channels exposed; zero means no morph dictionary
    fn channel_count(&self) -> usize;

    /// Channel name at `index`
    fn channel_name(&self, index: usize) -> Option<&str>;

    /// Current influence at `index` (0.0 when out of range)
    fn weight(&self, index: usize) -> f32;

    /// Overwrite influence at `index`; out-of-range writes are ignored
    fn set_weight(&mut self, index: usize, weight: f32);
}

/// Morph dictionary plus influence array
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MorphChannels {
    names: Vec<String>,
    weights: Vec<f32>,
    lookup: HashMap<String, usize>,
}

impl MorphChannels {
    /// Build from a name dictionary with every influence at rest
    pub fn new<I, S>(names: I) -> VisageResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let weights = vec![0.0; names.len()];
        Self::with_weights(names, weights)
    }

    /// Build from a dictionary and an initial influence array
    pub fn with_weights(names: Vec<String>, weights: Vec<f32>) -> VisageResult<Self> {
        if names.len() != weights.len() {
            return Err(VisageError::MorphArityMismatch {
                names: names.len(),
                weights: weights.len(),
            });
        }

        let mut lookup = HashMap::with_capacity(names.len());
        for (index, name) in names.iter().enumerate() {
            if lookup.insert(name.clone(), index).is_some() {
                return Err(VisageError::DuplicateChannel(name.clone()));
            }
        }

        Ok(Self {
            names,
            weights,
            lookup,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.lookup.get(name).copied()
    }

    /// Influence by channel name
    pub fn get(&self, name: &str) -> Option<f32> {
        self.index_of(name).map(|i| self.weights[i])
    }

    /// Set influence by channel name, returns false for unknown channels
    pub fn set(&mut self, name: &str, weight: f32) -> bool {
        match self.index_of(name) {
            Some(i) => {
                self.weights[i] = weight;
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Largest influence across all channels
    pub fn max_weight(&self) -> f32 {
        self.weights.iter().copied().fold(0.0, f32::max)
    }
}

impl MorphTarget for MorphChannels {
    fn channel_count(&self) -> usize {
        self.names.len()
    }

    fn channel_name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    fn weight(&self, index: usize) -> f32 {
        self.weights.get(index).copied().unwrap_or(0.0)
    }

    fn set_weight(&mut self, index: usize, weight: f32) {
        if let Some(w) = self.weights.get_mut(index) {
            *w = weight;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_lookup() {
        let mut channels = MorphChannels::new(["jawOpen", "mouthFunnel"]).unwrap();
        assert_eq!(channels.len(), 2);
        assert_eq!(channels.get("jawOpen"), Some(0.0));

        assert!(channels.set("mouthFunnel", 0.2));
        assert!(!channels.set("eyeBlinkLeft", 1.0));
        assert_eq!(channels.weight(1), 0.2);
        assert_eq!(channels.max_weight(), 0.2);
    }

    #[test]
    fn test_arity_mismatch() {
        let err = MorphChannels::with_weights(vec!["jawOpen".into()], vec![]).unwrap_err();
        assert_eq!(err, VisageError::MorphArityMismatch { names: 1, weights: 0 });
    }

    #[test]
    fn test_duplicate_channel() {
        let err = MorphChannels::new(["jawOpen", "jawOpen"]).unwrap_err();
        assert_eq!(err, VisageError::DuplicateChannel("jawOpen".into()));
    }

    #[test]
    fn test_out_of_range_write_ignored() {
        let mut channels = MorphChannels::new(["jawOpen"]).unwrap();
        channels.set_weight(5, 1.0);
        assert_eq!(channels.weight(5), 0.0);
        assert_eq!(channels.weights(), &[0.0]);
    }
}
