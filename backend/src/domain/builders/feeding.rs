//! Feeding entry builder.
//!
//! A single save can cover several feeding modes at once. Each selected
//! mode emits its own record, and a bottle section with both breastmilk
//! and formula amounts emits two bottle records, all sharing the one
//! logical timestamp but each with its own id.

use chrono::{DateTime, Utc};
use shared::{
    Activity, ActivityBase, ActivityKind, BottleFeeding, BreastFeeding, BreastSide,
    FeedingActivity, SolidsFeeding, SolidsReaction,
};

use crate::domain::commands::entries::FeedingEntryCommand;
use crate::domain::timefmt::clamp_to_now;
use crate::error::ValidationError;

use super::{clean_notes, created_at_for, ValidationReport};

const DEFAULT_UNIT: &str = "oz";

pub struct FeedingBuilder;

impl FeedingBuilder {
    pub fn validate(cmd: &FeedingEntryCommand) -> ValidationReport {
        let mut reasons = Vec::new();

        if cmd.breast.is_none() && cmd.bottle.is_none() && cmd.solids.is_none() {
            reasons.push("Select at least one feeding mode".to_string());
        }

        if let Some(breast) = &cmd.breast {
            if breast.left_minutes + breast.right_minutes <= 0 {
                reasons.push("Breast feeding needs a total of at least one minute".to_string());
            }
        }

        if let Some(bottle) = &cmd.bottle {
            if bottle.breast_milk_oz < 0.0 || bottle.formula_oz < 0.0 {
                reasons.push("Bottle amounts cannot be negative".to_string());
            } else if bottle.breast_milk_oz <= 0.0 && bottle.formula_oz <= 0.0 {
                reasons.push("Bottle feeding needs a positive amount".to_string());
            }
        }

        if let Some(solids) = &cmd.solids {
            if solids.foods.is_empty() {
                reasons.push("Add at least one food".to_string());
            } else if solids.foods.iter().any(|f| f.name.trim().is_empty()) {
                reasons.push("Every food needs a name".to_string());
            }
        }

        ValidationReport::from_reasons(reasons)
    }

    /// Build one record per selected mode (two for a double bottle).
    /// Either the whole set is valid or nothing is emitted.
    pub fn build(
        cmd: &FeedingEntryCommand,
        existing: Option<&Activity>,
        now: DateTime<Utc>,
    ) -> Result<Vec<Activity>, ValidationError> {
        Self::validate(cmd).into_result()?;

        let time = clamp_to_now(cmd.time, now);
        let timestamp = time.to_rfc3339();
        let millis = time.timestamp_millis() as u64;
        let notes = clean_notes(&cmd.notes);
        let unit = cmd.unit.clone().unwrap_or_else(|| DEFAULT_UNIT.to_string());

        let prev = match existing {
            Some(Activity::Feeding(prev)) => Some(prev),
            _ => None,
        };
        // When editing, the record for the matching mode keeps its id.
        let prev_id = |matches: bool| -> Option<String> {
            prev.filter(|_| matches).map(|p| p.base().id.clone())
        };

        let mut entries = Vec::new();

        if let Some(breast) = &cmd.breast {
            let total = breast.left_minutes + breast.right_minutes;
            let side = if breast.right_minutes > breast.left_minutes {
                BreastSide::Right
            } else {
                BreastSide::Left
            };
            let id = prev_id(matches!(prev, Some(FeedingActivity::Breast(_))))
                .unwrap_or_else(|| Activity::generate_id(ActivityKind::Feeding, millis));
            entries.push(Activity::Feeding(FeedingActivity::Breast(BreastFeeding {
                base: ActivityBase {
                    id,
                    user_id: None,
                    date_key: None,
                    title: format!("Breast: {} min", total),
                    created_at: created_at_for(prev.map(|p| p.base()), time),
                },
                start: timestamp.clone(),
                end: timestamp.clone(),
                side,
                notes: notes.clone(),
            })));
        }

        if let Some(bottle) = &cmd.bottle {
            let mut first_bottle = true;
            for amount in [bottle.breast_milk_oz, bottle.formula_oz] {
                if amount <= 0.0 {
                    continue;
                }
                let id = prev_id(first_bottle && matches!(prev, Some(FeedingActivity::Bottle(_))))
                    .unwrap_or_else(|| Activity::generate_id(ActivityKind::Feeding, millis));
                first_bottle = false;
                entries.push(Activity::Feeding(FeedingActivity::Bottle(BottleFeeding {
                    base: ActivityBase {
                        id,
                        user_id: None,
                        date_key: None,
                        title: format!("Bottle: {} {}", amount, unit),
                        created_at: created_at_for(prev.map(|p| p.base()), time),
                    },
                    amount,
                    unit: unit.clone(),
                    notes: notes.clone(),
                })));
            }
        }

        if let Some(solids) = &cmd.solids {
            let list = solids
                .foods
                .iter()
                .map(|f| f.name.trim())
                .collect::<Vec<_>>()
                .join(", ");
            let reaction = if solids.foods.iter().all(|f| f.liked) {
                SolidsReaction::Liked
            } else {
                SolidsReaction::Disliked
            };
            let id = prev_id(matches!(prev, Some(FeedingActivity::Solids(_))))
                .unwrap_or_else(|| Activity::generate_id(ActivityKind::Feeding, millis));
            entries.push(Activity::Feeding(FeedingActivity::Solids(SolidsFeeding {
                base: ActivityBase {
                    id,
                    user_id: None,
                    date_key: None,
                    title: format!("Solids: {}", list),
                    created_at: created_at_for(prev.map(|p| p.base()), time),
                },
                reaction,
                amount_desc: Some(list),
                notes,
            })));
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::entries::{BottleInput, BreastInput, FoodItem, SolidsInput};
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 19, h, m, 0).unwrap()
    }

    fn empty_cmd(time: DateTime<Utc>) -> FeedingEntryCommand {
        FeedingEntryCommand {
            time,
            breast: None,
            bottle: None,
            solids: None,
            unit: None,
            notes: None,
        }
    }

    #[test]
    fn test_no_mode_selected_is_rejected() {
        let err = FeedingBuilder::build(&empty_cmd(at(10, 0)), None, at(12, 0)).unwrap_err();
        assert_eq!(err.reasons, vec!["Select at least one feeding mode".to_string()]);
    }

    #[test]
    fn test_double_bottle_emits_two_records_with_respective_amounts() {
        let mut cmd = empty_cmd(at(10, 0));
        cmd.bottle = Some(BottleInput { breast_milk_oz: 3.0, formula_oz: 2.5 });

        let entries = FeedingBuilder::build(&cmd, None, at(12, 0)).unwrap();
        assert_eq!(entries.len(), 2);

        let amounts: Vec<f64> = entries
            .iter()
            .map(|e| match e {
                Activity::Feeding(FeedingActivity::Bottle(b)) => b.amount,
                other => panic!("expected bottle record, got {:?}", other),
            })
            .collect();
        assert_eq!(amounts, vec![3.0, 2.5]);
        assert_ne!(entries[0].base().id, entries[1].base().id);
        assert_eq!(entries[0].base().created_at, entries[1].base().created_at);
    }

    #[test]
    fn test_bottle_with_no_positive_amount_is_rejected() {
        let mut cmd = empty_cmd(at(10, 0));
        cmd.bottle = Some(BottleInput::default());
        let err = FeedingBuilder::build(&cmd, None, at(12, 0)).unwrap_err();
        assert_eq!(err.reasons, vec!["Bottle feeding needs a positive amount".to_string()]);
    }

    #[test]
    fn test_breast_side_goes_to_the_longer_side() {
        let mut cmd = empty_cmd(at(10, 0));
        cmd.breast = Some(BreastInput { left_minutes: 5, right_minutes: 12 });

        let entries = FeedingBuilder::build(&cmd, None, at(12, 0)).unwrap();
        match &entries[0] {
            Activity::Feeding(FeedingActivity::Breast(b)) => {
                assert_eq!(b.side, BreastSide::Right);
                assert_eq!(b.base.title, "Breast: 17 min");
                assert_eq!(b.start, b.end);
            }
            other => panic!("expected breast record, got {:?}", other),
        }
    }

    #[test]
    fn test_breast_tie_goes_left() {
        let mut cmd = empty_cmd(at(10, 0));
        cmd.breast = Some(BreastInput { left_minutes: 7, right_minutes: 7 });
        let entries = FeedingBuilder::build(&cmd, None, at(12, 0)).unwrap();
        match &entries[0] {
            Activity::Feeding(FeedingActivity::Breast(b)) => assert_eq!(b.side, BreastSide::Left),
            other => panic!("expected breast record, got {:?}", other),
        }
    }

    #[test]
    fn test_solids_reaction_is_liked_only_when_every_food_was_liked() {
        let mut cmd = empty_cmd(at(10, 0));
        cmd.solids = Some(SolidsInput {
            foods: vec![
                FoodItem { name: "banana".to_string(), liked: true },
                FoodItem { name: "peas".to_string(), liked: false },
            ],
        });

        let entries = FeedingBuilder::build(&cmd, None, at(12, 0)).unwrap();
        match &entries[0] {
            Activity::Feeding(FeedingActivity::Solids(s)) => {
                assert_eq!(s.reaction, SolidsReaction::Disliked);
                assert_eq!(s.amount_desc.as_deref(), Some("banana, peas"));
                assert_eq!(s.base.title, "Solids: banana, peas");
            }
            other => panic!("expected solids record, got {:?}", other),
        }
    }

    #[test]
    fn test_solids_with_blank_food_name_is_rejected() {
        let mut cmd = empty_cmd(at(10, 0));
        cmd.solids = Some(SolidsInput {
            foods: vec![FoodItem { name: "  ".to_string(), liked: true }],
        });
        let err = FeedingBuilder::build(&cmd, None, at(12, 0)).unwrap_err();
        assert_eq!(err.reasons, vec!["Every food needs a name".to_string()]);
    }

    #[test]
    fn test_multi_mode_save_keeps_primary_first() {
        let mut cmd = empty_cmd(at(10, 0));
        cmd.breast = Some(BreastInput { left_minutes: 10, right_minutes: 0 });
        cmd.bottle = Some(BottleInput { breast_milk_oz: 2.0, formula_oz: 0.0 });

        let entries = FeedingBuilder::build(&cmd, None, at(12, 0)).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(matches!(&entries[0], Activity::Feeding(FeedingActivity::Breast(_))));
        assert!(matches!(&entries[1], Activity::Feeding(FeedingActivity::Bottle(_))));
    }

    #[test]
    fn test_future_time_is_clamped() {
        let now = at(12, 0);
        let mut cmd = empty_cmd(at(14, 0));
        cmd.bottle = Some(BottleInput { breast_milk_oz: 4.0, formula_oz: 0.0 });

        let entries = FeedingBuilder::build(&cmd, None, now).unwrap();
        assert_eq!(entries[0].base().created_at, now.to_rfc3339());
    }

    #[test]
    fn test_editing_a_bottle_record_preserves_its_id() {
        let now = at(12, 0);
        let mut cmd = empty_cmd(at(10, 0));
        cmd.bottle = Some(BottleInput { breast_milk_oz: 4.0, formula_oz: 0.0 });
        let produced = FeedingBuilder::build(&cmd, None, now).unwrap().remove(0);

        let mut edit = empty_cmd(at(10, 0));
        edit.bottle = Some(BottleInput { breast_milk_oz: 5.0, formula_oz: 0.0 });
        let rebuilt = FeedingBuilder::build(&edit, Some(&produced), now).unwrap();

        assert_eq!(rebuilt[0].base().id, produced.base().id);
        assert_eq!(rebuilt[0].base().created_at, produced.base().created_at);
        match &rebuilt[0] {
            Activity::Feeding(FeedingActivity::Bottle(b)) => assert_eq!(b.amount, 5.0),
            other => panic!("expected bottle record, got {:?}", other),
        }
    }
}
