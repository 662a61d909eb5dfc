use crate::env::{ContentError, ContentOracle, EventDefinition, EventTrigger, RandomSource};
use crate::state::GameRuntimeState;

/// Filters `content`'s events down to those that may fire now.
///
/// An event passes when it has not already fired as a one-time event, is not
/// on cooldown, matches the current region (id, type and degradation lists;
/// empty lists are wildcards), has every required flag and no forbidden flag,
/// admits the current pressure, and its trigger matches `occasion`.
/// Declaration order is preserved.
pub fn select_available_events<'c>(
    content: &'c dyn ContentOracle,
    state: &GameRuntimeState,
    occasion: EventTrigger,
) -> Result<Vec<&'c EventDefinition>, ContentError> {
    let region_id = &state.world.current_region;
    let region = content
        .region(region_id)
        .ok_or_else(|| ContentError::unknown("region", region_id))?;
    let degradation = state
        .world
        .region(region_id)
        .map(|region| region.degradation)
        .unwrap_or_default();
    let pressure = state.world.pressure.value;

    Ok(content
        .events()
        .iter()
        .filter(|event| event.trigger.matches(occasion))
        .filter(|event| !(event.one_time && state.events.completed.contains(&event.id)))
        .filter(|event| !state.events.is_on_cooldown(&event.id))
        .filter(|event| event.regions.is_empty() || event.regions.contains(region_id))
        .filter(|event| {
            event.region_types.is_empty() || event.region_types.contains(&region.region_type)
        })
        .filter(|event| {
            event.region_degradation.is_empty() || event.region_degradation.contains(&degradation)
        })
        .filter(|event| event.required_flags.iter().all(|flag| state.has_flag(flag)))
        .filter(|event| !event.forbidden_flags.iter().any(|flag| state.has_flag(flag)))
        .filter(|event| (event.min_pressure..=event.max_pressure).contains(&pressure))
        .collect())
}

/// Weighted draw over `candidates`.
///
/// Draws one value in `[0, total_weight)` and walks the list accumulating
/// weights until the draw falls inside an event's slice. When every weight is
/// zero the draw is uniform over the candidates instead. An empty candidate
/// list yields `None` without touching `rng`.
pub fn pick_weighted<'c>(
    candidates: &[&'c EventDefinition],
    rng: &mut dyn RandomSource,
) -> Option<&'c EventDefinition> {
    if candidates.is_empty() {
        return None;
    }

    let total: u64 = candidates.iter().map(|event| u64::from(event.weight)).sum();
    if total == 0 {
        let index = rng.next_below(candidates.len() as u32) as usize;
        return candidates.get(index).copied();
    }

    let total = total.min(u64::from(u32::MAX)) as u32;
    let draw = u64::from(rng.next_below(total));
    let mut cumulative = 0u64;
    for event in candidates.iter().copied() {
        cumulative += u64::from(event.weight);
        if draw < cumulative {
            return Some(event);
        }
    }
    candidates.last().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{
        CampaignDefinition, ContentRegistry, HeroDefinition, PcgRng, RegionDefinition,
    };

    /// Replays a fixed sequence of raw draws.
    struct FixedRng {
        values: Vec<u32>,
        calls: usize,
    }

    impl FixedRng {
        fn new(values: &[u32]) -> Self {
            Self {
                values: values.to_vec(),
                calls: 0,
            }
        }
    }

    impl RandomSource for FixedRng {
        fn next_u32(&mut self) -> u32 {
            let value = self.values[self.calls % self.values.len()];
            self.calls += 1;
            value
        }
    }

    fn event(id: &str, weight: u32) -> EventDefinition {
        EventDefinition {
            id: id.into(),
            weight,
            ..EventDefinition::default()
        }
    }

    fn content(events: Vec<EventDefinition>) -> ContentRegistry {
        let mut content = ContentRegistry::new(CampaignDefinition {
            id: "test".into(),
            hero: "hero".into(),
            start_region: "forest".into(),
            ..CampaignDefinition::default()
        });
        content
            .heroes
            .insert(HeroDefinition {
                id: "hero".into(),
                max_health: 10,
                ..HeroDefinition::default()
            })
            .unwrap();
        content
            .regions
            .insert(RegionDefinition {
                id: "forest".into(),
                region_type: "wild".into(),
                ..RegionDefinition::default()
            })
            .unwrap();
        for event in events {
            content.events.insert(event).unwrap();
        }
        content
    }

    fn state(content: &ContentRegistry) -> GameRuntimeState {
        GameRuntimeState::new_game(1, content, &GameConfig::default()).unwrap()
    }

    #[test]
    fn forced_draw_lands_in_second_slice() {
        let a = event("a", 1);
        let b = event("b", 3);
        let candidates = vec![&a, &b];
        let mut rng = FixedRng::new(&[2]);
        assert_eq!(pick_weighted(&candidates, &mut rng).unwrap().id, "b");
    }

    #[test]
    fn draw_zero_lands_in_first_slice() {
        let a = event("a", 1);
        let b = event("b", 3);
        let mut rng = FixedRng::new(&[0]);
        assert_eq!(pick_weighted(&[&a, &b], &mut rng).unwrap().id, "a");
    }

    #[test]
    fn zero_weights_fall_back_to_uniform() {
        let a = event("a", 0);
        let b = event("b", 0);
        let c = event("c", 0);
        let mut rng = FixedRng::new(&[5]);
        assert_eq!(pick_weighted(&[&a, &b, &c], &mut rng).unwrap().id, "c");
        assert_eq!(rng.calls, 1);
    }

    #[test]
    fn empty_set_draws_nothing() {
        let mut rng = FixedRng::new(&[0]);
        assert!(pick_weighted(&[], &mut rng).is_none());
        assert_eq!(rng.calls, 0);
    }

    #[test]
    fn fired_one_time_event_is_filtered() {
        let content = content(vec![
            EventDefinition {
                one_time: true,
                ..event("shrine", 1)
            },
            event("wolves", 1),
        ]);
        let mut state = state(&content);
        state.events.completed.insert("shrine".into());
        let ids: Vec<_> = select_available_events(&content, &state, EventTrigger::Explore)
            .unwrap()
            .into_iter()
            .map(|event| event.id.as_str())
            .collect();
        assert_eq!(ids, vec!["wolves"]);
    }

    #[test]
    fn filters_on_region_flags_pressure_and_trigger() {
        let content = content(vec![
            EventDefinition {
                region_types: vec!["town".into()],
                ..event("market", 1)
            },
            EventDefinition {
                required_flags: vec!["moon".into()],
                ..event("howl", 1)
            },
            EventDefinition {
                min_pressure: 50,
                ..event("dread", 1)
            },
            EventDefinition {
                trigger: EventTrigger::Arrival,
                ..event("greeting", 1)
            },
            EventDefinition {
                region_degradation: vec![0],
                forbidden_flags: vec!["cleansed".into()],
                ..event("blight", 1)
            },
        ]);
        let state = state(&content);
        let ids: Vec<_> = select_available_events(&content, &state, EventTrigger::Explore)
            .unwrap()
            .into_iter()
            .map(|event| event.id.as_str())
            .collect();
        assert_eq!(ids, vec!["blight"]);
    }

    #[test]
    fn cooldown_hides_event() {
        let content = content(vec![event("patrol", 1)]);
        let mut state = state(&content);
        state.events.cooldowns.insert("patrol".into(), 2);
        assert!(
            select_available_events(&content, &state, EventTrigger::Any)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn selection_is_deterministic_per_seed() {
        let a = event("a", 2);
        let b = event("b", 5);
        let c = event("c", 1);
        let pick = |seed| {
            let mut rng = PcgRng::from_seed(seed);
            (0..20)
                .map(|_| pick_weighted(&[&a, &b, &c], &mut rng).unwrap().id.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(pick(11), pick(11));
    }
}
