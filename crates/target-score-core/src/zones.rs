use serde::{Deserialize, Serialize};

/// One scoring ring: everything whose (edge-corrected) distance from the
/// target center is at most `outer_ratio * estimated target diameter`
/// earns at least `points`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreZone {
    /// Outer boundary of the ring, as a ratio of the estimated target
    /// diameter in pixels.
    pub outer_ratio: f32,
    /// Point value credited inside this ring.
    pub points: u32,
}

/// Ordered ring table, innermost (highest value) first.
///
/// The table is configuration, not derived data: different disciplines
/// ship different ring layouts, and the scorer consumes whichever table
/// it is given. Outside the last ring the score is 0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneTable {
    pub zones: Vec<ScoreZone>,
    /// Credit the higher ring when the mark's *edge* crosses the ring
    /// line, not only its center (standard competitive adjudication).
    pub edge_breaking: bool,
}

/// Errors for malformed ring tables.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ZoneTableError {
    #[error("zone table must contain at least one zone")]
    Empty,
    #[error("zone ratios must be finite, positive and strictly increasing (zone {index})")]
    NonIncreasingRatio { index: usize },
    #[error("zone point values must be strictly decreasing (zone {index})")]
    NonDecreasingPoints { index: usize },
}

impl ZoneTable {
    pub fn new(zones: Vec<ScoreZone>, edge_breaking: bool) -> Result<Self, ZoneTableError> {
        let table = Self {
            zones,
            edge_breaking,
        };
        table.validate()?;
        Ok(table)
    }

    /// Check the table invariants: non-empty, ratios strictly increasing,
    /// point values strictly decreasing.
    pub fn validate(&self) -> Result<(), ZoneTableError> {
        if self.zones.is_empty() {
            return Err(ZoneTableError::Empty);
        }
        for (index, zone) in self.zones.iter().enumerate() {
            if !zone.outer_ratio.is_finite() || zone.outer_ratio <= 0.0 {
                return Err(ZoneTableError::NonIncreasingRatio { index });
            }
            if index > 0 {
                let prev = &self.zones[index - 1];
                if zone.outer_ratio <= prev.outer_ratio {
                    return Err(ZoneTableError::NonIncreasingRatio { index });
                }
                if zone.points >= prev.points {
                    return Err(ZoneTableError::NonDecreasingPoints { index });
                }
            }
        }
        Ok(())
    }

    /// Project Appleseed AQT 25 m layout: 5/4/3 rings at 12.5 %, 25 %
    /// and 50 % of the target diameter, scored with edge breaking.
    pub fn appleseed_aqt() -> Self {
        Self {
            zones: vec![
                ScoreZone {
                    outer_ratio: 0.125,
                    points: 5,
                },
                ScoreZone {
                    outer_ratio: 0.25,
                    points: 4,
                },
                ScoreZone {
                    outer_ratio: 0.50,
                    points: 3,
                },
            ],
            edge_breaking: true,
        }
    }

    /// Legacy 11-band linear layout: the target radius split into 11
    /// equal bands scored 10 down to 0, center position only (no edge
    /// correction).
    pub fn linear_bands() -> Self {
        let zones = (1..=11u32)
            .map(|k| ScoreZone {
                // Band k ends at k/11 of the target radius, i.e. half
                // that as a diameter ratio.
                outer_ratio: 0.5 * k as f32 / 11.0,
                points: 11 - k,
            })
            .collect();
        Self {
            zones,
            edge_breaking: false,
        }
    }
}

impl Default for ZoneTable {
    fn default() -> Self {
        Self::appleseed_aqt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        assert_eq!(ZoneTable::appleseed_aqt().validate(), Ok(()));
        assert_eq!(ZoneTable::linear_bands().validate(), Ok(()));
    }

    #[test]
    fn linear_bands_span_the_target_radius() {
        let table = ZoneTable::linear_bands();
        assert_eq!(table.zones.len(), 11);
        assert_eq!(table.zones[0].points, 10);
        assert_eq!(table.zones[10].points, 0);
        assert!((table.zones[10].outer_ratio - 0.5).abs() < 1e-6);
        assert!(!table.edge_breaking);
    }

    #[test]
    fn rejects_empty_table() {
        let table = ZoneTable {
            zones: vec![],
            edge_breaking: false,
        };
        assert_eq!(table.validate(), Err(ZoneTableError::Empty));
    }

    #[test]
    fn rejects_non_increasing_ratios() {
        let err = ZoneTable::new(
            vec![
                ScoreZone {
                    outer_ratio: 0.25,
                    points: 5,
                },
                ScoreZone {
                    outer_ratio: 0.25,
                    points: 4,
                },
            ],
            true,
        )
        .unwrap_err();
        assert_eq!(err, ZoneTableError::NonIncreasingRatio { index: 1 });
    }

    #[test]
    fn rejects_non_decreasing_points() {
        let err = ZoneTable::new(
            vec![
                ScoreZone {
                    outer_ratio: 0.1,
                    points: 5,
                },
                ScoreZone {
                    outer_ratio: 0.2,
                    points: 5,
                },
            ],
            true,
        )
        .unwrap_err();
        assert_eq!(err, ZoneTableError::NonDecreasingPoints { index: 1 });
    }

    #[test]
    fn zone_table_round_trips_through_json() {
        let table = ZoneTable::appleseed_aqt();
        let json = serde_json::to_string(&table).unwrap();
        let back: ZoneTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }
}
