use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScoutError};
use crate::model::Factor;

/// Relative importance of each factor.
///
/// Weights are expected to be non-negative. They conventionally sum to 1.0,
/// but nothing here enforces that; call [`WeightSet::normalized`] to get a
/// convex combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightSet {
    pub intelligence: f64,
    pub speed: f64,
    pub cost: f64,
}

impl WeightSet {
    pub const DEFAULT: WeightSet = WeightSet {
        intelligence: 0.4,
        speed: 0.4,
        cost: 0.2,
    };

    pub fn new(intelligence: f64, speed: f64, cost: f64) -> Result<Self> {
        let w = Self {
            intelligence,
            speed,
            cost,
        };
        w.validate()?;
        Ok(w)
    }

    /// Equal weight on every factor, summing to 1.
    pub fn equal() -> Self {
        let third = 1.0 / 3.0;
        Self {
            intelligence: third,
            speed: third,
            cost: third,
        }
    }

    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Intelligence => self.intelligence,
            Factor::Speed => self.speed,
            Factor::Cost => self.cost,
        }
    }

    pub fn sum(&self) -> f64 {
        self.intelligence + self.speed + self.cost
    }

    pub fn validate(&self) -> Result<()> {
        for factor in Factor::ALL {
            let value = self.get(factor);
            if !value.is_finite() || value < 0.0 {
                return Err(ScoutError::InvalidWeight {
                    factor: factor.key(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Scale the weights so they sum to 1.0.
    pub fn normalized(&self) -> Result<Self> {
        self.validate()?;
        let total = self.sum();
        if total <= 0.0 {
            return Err(ScoutError::ZeroWeights);
        }
        Ok(Self {
            intelligence: self.intelligence / total,
            speed: self.speed / total,
            cost: self.cost / total,
        })
    }

    /// True when the weights sum to 1 within floating-point noise.
    pub fn is_normalized(&self) -> bool {
        (self.sum() - 1.0).abs() < 1e-9
    }
}

impl Default for WeightSet {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for WeightSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "intelligence={:.2}  speed={:.2}  cost={:.2}",
            self.intelligence, self.speed, self.cost
        )
    }
}

/// Parse `0.4,0.4,0.2` (intelligence, speed, cost order) or
/// `intelligence=2,speed=1,cost=1`. Factors left out of the keyed form are 0.
impl FromStr for WeightSet {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            return Err(ScoutError::Other("empty weight list".into()));
        }

        let parse_num = |raw: &str| -> Result<f64> {
            raw.trim()
                .parse::<f64>()
                .map_err(|_| ScoutError::Other(format!("not a number: '{raw}'")))
        };

        if parts.iter().any(|p| p.contains('=')) {
            let mut w = Self {
                intelligence: 0.0,
                speed: 0.0,
                cost: 0.0,
            };
            for part in parts {
                let (key, value) = part
                    .split_once('=')
                    .ok_or_else(|| ScoutError::Other(format!("expected key=value, got '{part}'")))?;
                let factor = Factor::from_str(key).map_err(ScoutError::Other)?;
                let value = parse_num(value)?;
                match factor {
                    Factor::Intelligence => w.intelligence = value,
                    Factor::Speed => w.speed = value,
                    Factor::Cost => w.cost = value,
                }
            }
            w.validate()?;
            return Ok(w);
        }

        match parts.as_slice() {
            [i, s, c] => Self::new(parse_num(i)?, parse_num(s)?, parse_num(c)?),
            _ => Err(ScoutError::Other(format!(
                "expected 3 weights (intelligence,speed,cost), got {}",
                parts.len()
            ))),
        }
    }
}
