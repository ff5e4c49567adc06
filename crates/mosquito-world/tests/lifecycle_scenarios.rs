use mosquito_core::{LifecycleConfig, Sex, SimulationConfig};
use mosquito_world::{
    AlwaysSex, FemaleMosquito, MaleMosquito, Mosquito, Population, PopulationSimulator,
    ScriptedSex,
};

fn simulator() -> PopulationSimulator {
    PopulationSimulator::new(SimulationConfig {
        seed: Some(7),
        ..Default::default()
    })
    .expect("default config is valid")
}

#[test]
fn test_pair_after_three_days() {
    let result = simulator().run_with_sex(&Population::pair(), 3, AlwaysSex(Sex::Male));

    assert_eq!(result.males.len(), 1);
    assert_eq!(result.females.len(), 1);
    assert_eq!(result.males[0].day_mated, Some(0));
    assert_eq!(result.females[0].day_mated, Some(0));
    assert_eq!(result.males[0].days_lived, 3);
    assert_eq!(result.females[0].times_layed, 0);
}

#[test]
fn test_lone_male_stays_unmated() {
    let initial = Population::fresh(1, 0);
    let result = simulator().run(&initial, 500);

    assert_eq!(result.males.len(), 1);
    assert!(!result.males[0].has_mated());
    assert_eq!(result.males[0].days_lived, 500);
}

#[test]
fn test_male_dies_on_seventh_update() {
    let sim = simulator();
    let initial = Population::pair();

    let after_six = sim.run_with_sex(&initial, 6, AlwaysSex(Sex::Male));
    assert_eq!(after_six.males.len(), 1);
    assert_eq!(after_six.males[0].days_lived, 6);

    let after_seven = sim.run_with_sex(&initial, 7, AlwaysSex(Sex::Male));
    assert!(after_seven.males.is_empty());
}

#[test]
fn test_female_lays_three_times_then_dies() {
    let sim = simulator();
    let mut run = sim.start(&Population::pair(), AlwaysSex(Sex::Male));

    let mut laying_days = Vec::new();
    let mut death_day = None;
    for _ in 0..12 {
        let report = run.step();
        if report.laying_females > 0 {
            laying_days.push(report.day);
        }
        if report.female_deaths > 0 {
            death_day = Some(report.day);
        }
    }

    assert_eq!(laying_days, vec![3, 6, 9]);
    // Removed on the day of her third laying.
    assert_eq!(death_day, Some(9));
    assert!(run.population().females.is_empty());
    assert_eq!(run.eggs().len(), 300);
}

#[test]
fn test_first_clutch_hatches_thirteen_days_after_laying() {
    let sim = simulator();

    // Laid on day 3, so nothing hatches through day 15.
    let through_fifteen = sim.run_with_sex(&Population::pair(), 16, AlwaysSex(Sex::Female));
    assert!(through_fifteen.is_empty());

    let through_sixteen = sim.run_with_sex(&Population::pair(), 17, AlwaysSex(Sex::Female));
    assert_eq!(through_sixteen.females.len(), 100);
    assert!(through_sixteen.males.is_empty());
    assert!(through_sixteen
        .females
        .iter()
        .all(|f| !f.has_mated() && f.days_lived == 1));
}

#[test]
fn test_hatch_sexes_follow_source() {
    let sim = simulator();
    let script = ScriptedSex::new(vec![Sex::Male, Sex::Male, Sex::Male, Sex::Female])
        .expect("script is non-empty");
    let result = sim.run_with_sex(&Population::pair(), 17, script);

    assert_eq!(result.males.len(), 75);
    assert_eq!(result.females.len(), 25);
}

#[test]
fn test_hatchlings_mate_next_day() {
    let sim = simulator();
    let mut run = sim.start(&Population::pair(), ScriptedSex::alternating());
    for _ in 0..17 {
        run.step();
    }
    assert!(run.population().males.iter().all(|m| !m.has_mated()));

    let report = run.step();
    assert_eq!(report.day, 17);
    assert_eq!(report.mating_pairs, 50);
    assert!(run
        .population()
        .females
        .iter()
        .all(|f| f.day_mated == Some(17)));
}

#[test]
fn test_thirty_day_alternating_colony() {
    let result = simulator().run_with_sex(&Population::pair(), 30, ScriptedSex::alternating());

    // Three cohorts of 50 males survive; only the day-22 cohort of females does.
    assert_eq!(result.males.len(), 150);
    assert!(result.males.iter().all(|m| m.has_mated()));
    assert_eq!(result.females.len(), 50);
    assert!(result
        .females
        .iter()
        .all(|f| f.day_mated == Some(23) && f.times_layed == 2 && f.last_day_layed == Some(29)));
}

#[test]
fn test_prior_mating_history_is_respected() {
    // A recorded mating day carries into the run: she is never re-paired and
    // lays three days after it.
    let initial = Population::new(
        vec![MaleMosquito::new()],
        vec![FemaleMosquito::mated(2, 4)],
    );
    let sim = simulator();
    let mut run = sim.start(&initial, AlwaysSex(Sex::Male));

    let day0 = run.step();
    assert_eq!(day0.mating_pairs, 0);
    for _ in 1..5 {
        assert_eq!(run.step().eggs_laid, 0);
    }
    assert_eq!(run.step().eggs_laid, 100);
    assert_eq!(run.population().females[0].day_mated, Some(2));
}

#[test]
fn test_custom_lifecycle() {
    let config = SimulationConfig {
        seed: Some(1),
        lifecycle: LifecycleConfig {
            eggs_per_laying: 4,
            incubation_days: 2,
            laying_interval_days: 1,
            max_layings: 1,
            male_days_after_mating: 0,
            male_ratio: 0.5,
        },
        ..Default::default()
    };
    let sim = PopulationSimulator::new(config).unwrap();
    let mut run = sim.start(&Population::pair(), AlwaysSex(Sex::Female));

    // Day 0: mate. Day 1: lay 4, female dies, male dies.
    run.step();
    let day1 = run.step();
    assert_eq!(day1.eggs_laid, 4);
    assert_eq!(day1.female_deaths, 1);
    assert_eq!(day1.male_deaths, 1);

    // Queued at end of day 1, aged on days 2 and 3, hatched on day 4.
    assert_eq!(run.step().hatched(), 0);
    assert_eq!(run.step().hatched(), 0);
    assert_eq!(run.step().hatched_females, 4);
}
