use serde::{Deserialize, Serialize};

/// A named language model with its three raw readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    /// Intelligence index, nominally 0-100.
    pub intelligence: f64,
    /// Output tokens per second, nominally 0-500.
    pub speed: f64,
    /// USD per 1M tokens, nominally 0-100.
    pub cost: f64,
}

impl Entity {
    pub fn new(name: impl Into<String>, intelligence: f64, speed: f64, cost: f64) -> Self {
        Self {
            name: name.into(),
            intelligence,
            speed,
            cost,
        }
    }

    /// Raw reading for one factor.
    pub fn raw(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Intelligence => self.intelligence,
            Factor::Speed => self.speed,
            Factor::Cost => self.cost,
        }
    }
}

/// One of the three attributes a model is ranked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Factor {
    Intelligence,
    Speed,
    Cost,
}

impl Factor {
    pub const ALL: [Factor; 3] = [Factor::Intelligence, Factor::Speed, Factor::Cost];

    pub fn key(self) -> &'static str {
        match self {
            Factor::Intelligence => "intelligence",
            Factor::Speed => "speed",
            Factor::Cost => "cost",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Factor::Intelligence => "Intelligence",
            Factor::Speed => "Speed",
            Factor::Cost => "Cost",
        }
    }

    /// Unit shown next to raw readings.
    pub fn unit(self) -> &'static str {
        match self {
            Factor::Intelligence => "index",
            Factor::Speed => "tok/s",
            Factor::Cost => "$/1M tok",
        }
    }
}

impl std::fmt::Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Factor {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "intelligence" | "intel" | "i" => Ok(Self::Intelligence),
            "speed" | "s" => Ok(Self::Speed),
            "cost" | "c" => Ok(Self::Cost),
            other => Err(format!("unknown factor: {other}")),
        }
    }
}
