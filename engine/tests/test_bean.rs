//! Tests for the Bean model
//!
//! Covers skill-level drawing, luck-mode construction, and the guarantee
//! that a skill-`k` bean lands in slot `k`.

use bean_machine_core_rs::{Bean, BeanMachine, BeanMode, RngManager};

#[test]
fn test_luck_bean_has_no_skill_level() {
    let rng = RngManager::shared(1);
    let bean = Bean::new(10, BeanMode::Luck, &rng);
    assert_eq!(bean.skill_level(), None);
}

#[test]
fn test_skill_level_names_a_real_slot() {
    for seed in 1..=50 {
        let rng = RngManager::shared(seed);
        for slot_count in 1..=8 {
            let bean = Bean::new(slot_count, BeanMode::Skill, &rng);
            let level = bean.skill_level().expect("skill bean must carry a level");
            assert!(
                (level as usize) < slot_count,
                "seed {} drew level {} for {} slots",
                seed,
                level,
                slot_count
            );
        }
    }
}

#[test]
fn test_same_seed_draws_same_levels() {
    let draw = |seed: u64| -> Vec<u32> {
        let rng = RngManager::shared(seed);
        (0..12)
            .map(|_| Bean::new(10, BeanMode::Skill, &rng).skill_level().unwrap())
            .collect()
    };

    assert_eq!(draw(9001), draw(9001));
}

#[test]
fn test_skill_bean_lands_in_its_slot() {
    for slot_count in 1..=6 {
        for level in 0..slot_count as u32 {
            let mut machine = BeanMachine::new(slot_count);
            machine.reset(vec![Bean::with_skill_level(level)]);
            while machine.advance_step() {}

            assert_eq!(
                machine.slot_bean_count(level as usize),
                1,
                "skill-{} bean missed its slot on a {}-slot board",
                level,
                slot_count
            );
            assert_eq!(machine.count_beans_in_slots(), 1);
        }
    }
}

#[test]
fn test_bean_ids_are_unique() {
    let rng = RngManager::shared(5);
    let beans: Vec<Bean> = (0..100).map(|_| Bean::new(5, BeanMode::Luck, &rng)).collect();

    let mut ids: Vec<_> = beans.iter().map(Bean::id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 100);
}
