//! Ranking, proximity and freshness scenarios over realistic snapshots

use fieldmatch::config::MatchingConfig;
use fieldmatch::core::models::{Agent, AgentRole, Priority, Task, TaskStatus};
use fieldmatch::core::services::geo::distance_between_opt;
use fieldmatch::core::services::{
    Eta, is_location_fresh, nearest_agents, rank_candidate_agents, rank_candidate_tasks,
};

use super::common::{collector, held_tasks, minutes_from_now, now, site};

// =============================================================================
// DISTANCE
// =============================================================================

#[test]
fn test_sample_pair_is_nearby() {
    let agent = collector("a1", 15.6000, 32.5300);
    let task = site("t1", 15.6245, 32.5342);

    let km = distance_between_opt(agent.position(), task.position()).unwrap().km();
    assert!(km > 2.5 && km < 3.0, "unexpected distance {km}");

    let ranked = rank_candidate_agents(&task, std::slice::from_ref(&agent), &[], now(), &MatchingConfig::default());
    assert!(ranked[0].is_nearby);
}

// =============================================================================
// AGENT RANKING
// =============================================================================

#[test]
fn test_overload_dominates_distance() {
    let task = site("t1", 15.0, 32.0);
    // ~5 km and ~20 km north
    let agents = vec![collector("agent1", 15.045, 32.0), collector("agent2", 15.18, 32.0)];
    let mut tasks = held_tasks("agent1", TaskStatus::Assigned, 25);
    tasks.extend(held_tasks("agent2", TaskStatus::InProgress, 2));

    let ranked = rank_candidate_agents(&task, &agents, &tasks, now(), &MatchingConfig::default());
    let order: Vec<&str> = ranked.iter().map(|m| m.agent.id.as_str()).collect();
    assert_eq!(order, vec!["agent2", "agent1"]);
    assert_eq!(ranked[1].workload.active, 25);
    assert!(ranked[1].is_overloaded);
}

#[test]
fn test_role_spellings_are_all_eligible() {
    let json = r#"[
        {"id": "a", "role": "dataCollector", "location": {"latitude": 15.0, "longitude": 32.0}},
        {"id": "b", "role": "Data Collector", "location": {"latitude": 15.0, "longitude": 32.0}},
        {"id": "c", "role": "DATA_COLLECTOR", "location": {"latitude": 15.0, "longitude": 32.0}},
        {"id": "d", "role": "admin", "location": {"latitude": 15.0, "longitude": 32.0}}
    ]"#;
    let agents: Vec<Agent> = serde_json::from_str(json).unwrap();
    assert!(agents[..3].iter().all(|a| a.role == AgentRole::DataCollector));
    assert_eq!(agents[3].role, AgentRole::Other);

    let task = site("t1", 15.0, 32.0);
    let ranked = rank_candidate_agents(&task, &agents, &[], now(), &MatchingConfig::default());
    assert_eq!(ranked.len(), 3);
}

#[test]
fn test_ranking_is_deterministic() {
    let task = site("t1", 15.0, 32.0);
    let agents: Vec<Agent> = (0..8)
        .map(|i| collector(&format!("a{i}"), 15.0 + f64::from(i % 3) * 0.05, 32.0))
        .collect();
    let config = MatchingConfig::default();

    let first: Vec<String> = rank_candidate_agents(&task, &agents, &[], now(), &config)
        .iter()
        .map(|m| m.agent.id.clone())
        .collect();
    let second: Vec<String> = rank_candidate_agents(&task, &agents, &[], now(), &config)
        .iter()
        .map(|m| m.agent.id.clone())
        .collect();
    assert_eq!(first, second);
    // equal distances keep input order
    assert_eq!(&first[..3], &["a0", "a3", "a6"]);
}

// =============================================================================
// TASK RANKING
// =============================================================================

#[test]
fn test_coordinate_less_tasks_rank_last_by_priority() {
    let agent = collector("a1", 15.0, 32.0);
    let tasks = vec![
        Task::new("low", TaskStatus::Pending).with_priority(Priority::Low),
        Task::new("medium", TaskStatus::Pending).with_priority(Priority::Medium),
        site("far", 16.0, 32.0),
        Task::new("high", TaskStatus::PermitVerified).with_priority(Priority::High),
        site("near", 15.1, 32.0),
    ];

    let ranked = rank_candidate_tasks(&agent, &tasks, &MatchingConfig::default());
    let order: Vec<&str> = ranked.iter().map(|m| m.task.id.as_str()).collect();
    assert_eq!(order, vec!["near", "far", "high", "medium", "low"]);
}

#[test]
fn test_only_assignable_tasks_are_ranked() {
    let agent = collector("a1", 15.0, 32.0);
    let tasks: Vec<Task> = [
        TaskStatus::Pending,
        TaskStatus::PermitVerified,
        TaskStatus::Assigned,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
    ]
    .into_iter()
    .map(|status| Task::new(status.to_string(), status).with_coordinates(15.0, 32.0))
    .collect();

    let ranked = rank_candidate_tasks(&agent, &tasks, &MatchingConfig::default());
    assert_eq!(ranked.len(), 2);
    assert!(ranked.iter().all(|m| m.task.status.is_assignable()));
}

// =============================================================================
// NEAREST AGENTS & FRESHNESS
// =============================================================================

#[test]
fn test_freshness_boundary() {
    assert!(!is_location_fresh(Some(minutes_from_now(-30)), now(), 30));
    assert!(is_location_fresh(Some(minutes_from_now(-29)), now(), 30));
    assert!(!is_location_fresh(None, now(), 30));
}

#[test]
fn test_nearest_uses_configured_threshold_and_speed() {
    let task = site("t1", 15.0, 32.0);
    let agents = vec![
        Agent::new("a1", AgentRole::DataCollector).with_location(15.9, 32.0, Some(minutes_from_now(-45))),
    ];
    let config = MatchingConfig {
        freshness_threshold_minutes: 60,
        average_speed_kmh: 50.0,
        ..MatchingConfig::default()
    };

    let results = nearest_agents(&task, &agents, 5, now(), &config);
    assert_eq!(results.len(), 1);
    assert!(results[0].is_fresh);
    // ~100 km at 50 km/h
    assert_eq!(results[0].estimated_arrival, Eta::Hours(2.0));
}

#[test]
fn test_nearest_ignores_workload() {
    let task = site("t1", 15.0, 32.0);
    let agents = vec![collector("busy", 15.01, 32.0), collector("idle", 15.2, 32.0)];
    let tasks = held_tasks("busy", TaskStatus::Assigned, 40);

    // the ranker demotes the busy agent, the proximity view does not
    let ranked = rank_candidate_agents(&task, &agents, &tasks, now(), &MatchingConfig::default());
    assert_eq!(ranked[0].agent.id, "idle");

    let nearest = nearest_agents(&task, &agents, 5, now(), &MatchingConfig::default());
    assert_eq!(nearest[0].agent.id, "busy");
}
