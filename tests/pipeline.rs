use u_cde::apply::optimize_and_apply;
use u_cde::de::{CdeConfig, CdeOptimizer, GeneRepair};
use u_cde::kpi::{SelectionKpi, WorkloadSummary};
use u_cde::models::{CompletedJob, ResourcePool};
use u_cde::CdeError;

/// Ten finished jobs shaped like a small simulation run.
fn simulated_jobs() -> Vec<CompletedJob> {
    let lengths = [
        52_310u64, 97_004, 64_210, 50_872, 88_123, 71_500, 99_420, 60_001, 83_333, 55_555,
    ];
    lengths
        .iter()
        .enumerate()
        .map(|(i, &len)| {
            let finish = 0.1 + len as f64 / 1000.0;
            CompletedJob::new(i as u64, len)
                .with_resource(i % 10)
                .with_times(0.1, finish)
        })
        .collect()
}

#[test]
fn test_end_to_end_selection() {
    let jobs = simulated_jobs();
    let mut pool = ResourcePool::with_default_resources(10);
    let config = CdeConfig::default()
        .with_population_size(20)
        .with_generations(60)
        .with_seed(0.123);

    let initial = CdeOptimizer::new(config.clone(), &jobs, pool.len()).unwrap();
    let (_, initial_best) = initial.population().best().unwrap();
    let initial_best_fitness = initial_best.fitness;

    let outcome = optimize_and_apply(&config, &jobs, &mut pool).unwrap();

    assert_eq!(outcome.result.population.len(), 20);
    assert_eq!(outcome.applied, outcome.result.best.selected_indices());
    assert_eq!(pool.selected_indices(), outcome.applied);

    let kpi = SelectionKpi::calculate(&outcome.result.best, &jobs, &pool).unwrap();
    assert!((kpi.scaled_time - outcome.result.best_fitness).abs() < 1e-10);
    assert_eq!(kpi.selected_count, outcome.applied.len());

    let first_generation_best = outcome.result.history.first().unwrap().best_fitness;
    assert!(first_generation_best <= initial_best_fitness);
    assert!(outcome.result.best_fitness <= first_generation_best);
}

#[test]
fn test_end_to_end_reproducible() {
    let jobs = simulated_jobs();
    let config = CdeConfig::default()
        .with_population_size(15)
        .with_generations(30)
        .with_seed(0.41)
        .with_parallel(true);

    let mut pool_a = ResourcePool::with_default_resources(10);
    let mut pool_b = ResourcePool::with_default_resources(10);
    let a = optimize_and_apply(&config, &jobs, &mut pool_a).unwrap();
    let b = optimize_and_apply(&config, &jobs, &mut pool_b).unwrap();

    assert_eq!(a, b);
    assert_eq!(pool_a, pool_b);
}

#[test]
fn test_truncate_repair_end_to_end() {
    let jobs = simulated_jobs();
    let mut pool = ResourcePool::with_default_resources(10);
    let config = CdeConfig::default()
        .with_population_size(10)
        .with_generations(20)
        .with_mutation_factor(1.5)
        .with_gene_repair(GeneRepair::Truncate)
        .with_seed(0.3);

    let outcome = optimize_and_apply(&config, &jobs, &mut pool).unwrap();
    assert!(outcome.result.best_fitness >= 0.0);
    assert!(outcome.applied.iter().all(|&i| i < 10));
}

#[test]
fn test_pool_larger_than_job_list() {
    let jobs = simulated_jobs();
    let mut pool = ResourcePool::with_default_resources(11);
    let err = optimize_and_apply(&CdeConfig::default(), &jobs, &mut pool).unwrap_err();
    assert!(matches!(err, CdeError::InvalidInput(_)));
}

#[test]
fn test_workload_summary_of_simulated_jobs() {
    let jobs = simulated_jobs();
    let summary = WorkloadSummary::from_jobs(&jobs);
    assert_eq!(summary.job_count, 10);
    assert_eq!(summary.succeeded, 10);
    assert!((summary.makespan - (0.1 + 99.42)).abs() < 1e-9);
}
