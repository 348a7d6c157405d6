// src/types.rs
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

// IMU channel keys, in grid order
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub enum ChannelKey {
    Ax,
    Ay,
    Az,
    Gx,
    Gy,
    Gz,
}

impl ChannelKey {
    /// Canonical order: accelerometer x/y/z, then gyroscope x/y/z.
    pub const ALL: [ChannelKey; 6] = [
        ChannelKey::Ax,
        ChannelKey::Ay,
        ChannelKey::Az,
        ChannelKey::Gx,
        ChannelKey::Gy,
        ChannelKey::Gz,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChannelKey::Ax => "ax",
            ChannelKey::Ay => "ay",
            ChannelKey::Az => "az",
            ChannelKey::Gx => "gx",
            ChannelKey::Gy => "gy",
            ChannelKey::Gz => "gz",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// One loaded archive: named 1-D sequences
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Recording {
    pub origin: Option<PathBuf>,
    pub arrays: BTreeMap<String, Vec<f64>>,
}

impl Recording {
    pub fn new(origin: Option<PathBuf>) -> Self {
        Self { origin, arrays: BTreeMap::new() }
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.arrays.insert(name.into(), values);
    }

    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.arrays.get(name).map(Vec::as_slice)
    }

    /// Recording with every channel key set to `samples`.
    #[cfg(test)]
    pub fn uniform(samples: Vec<f64>) -> Self {
        let mut recording = Self::new(None);
        for key in ChannelKey::ALL {
            recording.insert(key.as_str(), samples.clone());
        }
        recording
    }
}
