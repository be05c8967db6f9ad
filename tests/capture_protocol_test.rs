//! Integration tests for the capture protocol, driven through mock ports.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use hexclash::domain::errors::{GameError, GameResult, SyncError};
use hexclash::domain::models::{
    Challenge, Difficulty, Faction, Fixture, Session, Territory, TerritoryTable,
};
use hexclash::domain::ports::{
    ChallengeSource, ExecutionReport, Replica, Sandbox, TerritoryStore,
};
use hexclash::services::{CaptureOutcome, CaptureService, Judge, ProblemBank};

const TABLE_PATH: &str = "data/territories.json";
const EXPECTED_OUTPUT: &str = "fizz";

/// Store serving a scripted sequence of tables on `load` (last one repeats)
/// and recording every `save`.
struct MockStore {
    loads: Mutex<Vec<TerritoryTable>>,
    load_count: AtomicUsize,
    saves: Mutex<Vec<(PathBuf, TerritoryTable)>>,
}

impl MockStore {
    fn new(loads: Vec<TerritoryTable>) -> Self {
        Self {
            loads: Mutex::new(loads),
            load_count: AtomicUsize::new(0),
            saves: Mutex::new(Vec::new()),
        }
    }

    fn saved(&self) -> Vec<TerritoryTable> {
        self.saves
            .lock()
            .unwrap()
            .iter()
            .map(|(_, table)| table.clone())
            .collect()
    }

    fn saved_paths(&self) -> Vec<PathBuf> {
        self.saves
            .lock()
            .unwrap()
            .iter()
            .map(|(path, _)| path.clone())
            .collect()
    }
}

#[async_trait]
impl TerritoryStore for MockStore {
    async fn load(&self, _path: &Path) -> GameResult<TerritoryTable> {
        let loads = self.loads.lock().unwrap();
        let index = self.load_count.fetch_add(1, Ordering::SeqCst);
        Ok(loads[index.min(loads.len() - 1)].clone())
    }

    async fn save(&self, path: &Path, table: &TerritoryTable) -> GameResult<()> {
        self.saves
            .lock()
            .unwrap()
            .push((path.to_path_buf(), table.clone()));
        Ok(())
    }
}

/// Replica recording pulls and publishes, with injectable failures.
struct MockReplica {
    fail_pull: bool,
    fail_publish: bool,
    pulls: AtomicUsize,
    publishes: Mutex<Vec<(Vec<PathBuf>, String)>>,
}

impl MockReplica {
    fn new() -> Self {
        Self {
            fail_pull: false,
            fail_publish: false,
            pulls: AtomicUsize::new(0),
            publishes: Mutex::new(Vec::new()),
        }
    }

    fn failing_pull() -> Self {
        Self {
            fail_pull: true,
            ..Self::new()
        }
    }

    fn failing_publish() -> Self {
        Self {
            fail_publish: true,
            ..Self::new()
        }
    }

    fn published(&self) -> Vec<(Vec<PathBuf>, String)> {
        self.publishes.lock().unwrap().clone()
    }
}

#[async_trait]
impl Replica for MockReplica {
    async fn pull(&self) -> Result<(), SyncError> {
        self.pulls.fetch_add(1, Ordering::SeqCst);
        if self.fail_pull {
            return Err(SyncError::Network {
                stderr: "could not resolve host".to_string(),
            });
        }
        Ok(())
    }

    async fn publish(&self, paths: &[&Path], message: &str) -> Result<(), SyncError> {
        self.publishes.lock().unwrap().push((
            paths.iter().map(|p| p.to_path_buf()).collect(),
            message.to_string(),
        ));
        if self.fail_publish {
            return Err(SyncError::NonFastForward {
                stderr: "! [rejected]".to_string(),
            });
        }
        Ok(())
    }
}

/// Single-challenge bank: `fizzbuzz` in every tier, expecting `fizz`.
struct SingleChallengeBank;

#[async_trait]
impl ChallengeSource for SingleChallengeBank {
    async fn list_ids(&self, _tier: Difficulty) -> GameResult<Vec<String>> {
        Ok(vec!["fizzbuzz".to_string()])
    }

    async fn load(&self, _tier: Difficulty, id: &str) -> GameResult<Challenge> {
        Ok(Challenge {
            id: id.to_string(),
            title: "FizzBuzz".to_string(),
            description: "Print fizz.".to_string(),
        })
    }

    async fn load_fixture(&self, _tier: Difficulty, _id: &str) -> GameResult<Fixture> {
        Ok(Fixture {
            expected_output: EXPECTED_OUTPUT.to_string(),
        })
    }
}

/// Sandbox returning a fixed stdout and counting invocations.
struct ScriptedSandbox {
    stdout: String,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Sandbox for ScriptedSandbox {
    async fn run(&self, _artifact: &Path, _timeout: Duration) -> GameResult<ExecutionReport> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ExecutionReport {
            stdout: self.stdout.clone(),
            stderr: String::new(),
            exit_code: Some(0),
            timed_out: false,
        })
    }
}

fn hex(id: u32, owner: Option<Faction>, difficulty: Difficulty) -> Territory {
    Territory {
        id,
        owner,
        difficulty,
        q: 0,
        r: 0,
    }
}

struct Harness {
    store: Arc<MockStore>,
    replica: Arc<MockReplica>,
    judge_calls: Arc<AtomicUsize>,
    service: CaptureService,
}

fn harness(loads: Vec<TerritoryTable>, replica: MockReplica, stdout: &str) -> Harness {
    harness_with_paths(loads, replica, stdout, TABLE_PATH, TABLE_PATH)
}

fn harness_with_paths(
    loads: Vec<TerritoryTable>,
    replica: MockReplica,
    stdout: &str,
    table_path: &str,
    publish_path: &str,
) -> Harness {
    let store = Arc::new(MockStore::new(loads));
    let replica = Arc::new(replica);
    let judge_calls = Arc::new(AtomicUsize::new(0));
    let sandbox = Arc::new(ScriptedSandbox {
        stdout: stdout.to_string(),
        calls: Arc::clone(&judge_calls),
    });

    let service = CaptureService::new(
        Arc::clone(&store) as Arc<dyn TerritoryStore>,
        Arc::clone(&replica) as Arc<dyn Replica>,
        ProblemBank::with_seed(Arc::new(SingleChallengeBank), 42),
        Judge::new(sandbox, Duration::from_secs(1)),
        table_path,
        publish_path,
        "solution",
    );

    Harness {
        store,
        replica,
        judge_calls,
        service,
    }
}

fn red_alice() -> Session {
    Session::new("alice", Faction::Red)
}

#[tokio::test]
async fn successful_capture_mutates_and_publishes() {
    let table = TerritoryTable::new(vec![hex(7, None, Difficulty::Easy)]);
    let h = harness(vec![table], MockReplica::new(), "fizz\n");

    let outcome = h.service.attack(&red_alice(), 7).await.unwrap();
    match outcome {
        CaptureOutcome::Captured {
            id,
            previous_owner,
            new_owner,
            previous_difficulty,
            new_difficulty,
            ref challenge_id,
        } => {
            assert_eq!(id, 7);
            assert_eq!(previous_owner, None);
            assert_eq!(new_owner, Faction::Red);
            assert_eq!(previous_difficulty, Difficulty::Easy);
            assert_eq!(new_difficulty, Difficulty::Medium);
            assert_eq!(challenge_id, "fizzbuzz");
        }
        other => panic!("expected capture, got {other:?}"),
    }

    let saved = h.store.saved();
    assert_eq!(saved.len(), 1);
    let written = saved[0].find(7).unwrap();
    assert_eq!(written.owner, Some(Faction::Red));
    assert_eq!(written.difficulty, Difficulty::Medium);

    let published = h.replica.published();
    assert_eq!(published.len(), 1);
    let (paths, message) = &published[0];
    assert_eq!(paths, &vec![PathBuf::from(TABLE_PATH)]);
    assert!(message.contains('7'));
    assert!(message.contains("alice"));
    assert!(message.contains("red"));
    assert!(message.contains("easy->medium"));
    assert!(message.contains("fizzbuzz"));
}

#[tokio::test]
async fn publishes_the_repo_relative_table_path() {
    // When the repository is not the working directory, the store resolves
    // the table against the cwd while the replica stages a pathspec relative
    // to the repository root. Publishing the cwd-joined path would make
    // `git add` miss the file.
    let table = TerritoryTable::new(vec![hex(7, None, Difficulty::Easy)]);
    let h = harness_with_paths(
        vec![table],
        MockReplica::new(),
        "fizz",
        "clone/data/territories.json",
        "data/territories.json",
    );

    let outcome = h.service.attack(&red_alice(), 7).await.unwrap();
    assert!(outcome.is_capture());

    assert_eq!(
        h.store.saved_paths(),
        vec![PathBuf::from("clone/data/territories.json")]
    );
    let (paths, _) = &h.replica.published()[0];
    assert_eq!(paths, &vec![PathBuf::from("data/territories.json")]);
}

#[tokio::test]
async fn already_owned_aborts_before_judging() {
    let table = TerritoryTable::new(vec![hex(3, Some(Faction::Red), Difficulty::Hard)]);
    let h = harness(vec![table], MockReplica::new(), "fizz");

    let outcome = h.service.attack(&red_alice(), 3).await.unwrap();
    assert!(matches!(
        outcome,
        CaptureOutcome::AlreadyOwned {
            id: 3,
            owner: Faction::Red
        }
    ));

    assert_eq!(h.judge_calls.load(Ordering::SeqCst), 0);
    assert!(h.store.saved().is_empty());
    assert!(h.replica.published().is_empty());
}

#[tokio::test]
async fn unknown_territory_is_a_validation_error() {
    let table = TerritoryTable::new(vec![hex(1, None, Difficulty::Easy)]);
    let h = harness(vec![table], MockReplica::new(), "fizz");

    let err = h.service.attack(&red_alice(), 99).await.unwrap_err();
    assert!(matches!(err, GameError::TerritoryNotFound(99)));
    assert!(h.store.saved().is_empty());
}

#[tokio::test]
async fn failed_verdict_is_a_loss_and_writes_nothing() {
    let table = TerritoryTable::new(vec![hex(7, Some(Faction::Blue), Difficulty::Medium)]);
    let h = harness(vec![table], MockReplica::new(), "buzz\n");

    let outcome = h.service.attack(&red_alice(), 7).await.unwrap();
    match outcome {
        CaptureOutcome::Defended {
            id,
            ref expected,
            ref actual,
            ..
        } => {
            assert_eq!(id, 7);
            assert_eq!(expected, "fizz");
            assert_eq!(actual, "buzz");
        }
        other => panic!("expected defended, got {other:?}"),
    }

    assert!(h.store.saved().is_empty());
    assert!(h.replica.published().is_empty());
}

#[tokio::test]
async fn owner_change_between_snapshots_aborts_without_write() {
    // First load: unclaimed. Re-read after judging: blue got there first.
    let before = TerritoryTable::new(vec![hex(7, None, Difficulty::Easy)]);
    let after = TerritoryTable::new(vec![hex(7, Some(Faction::Blue), Difficulty::Medium)]);
    let h = harness(vec![before, after], MockReplica::new(), "fizz");

    let outcome = h.service.attack(&red_alice(), 7).await.unwrap();
    match outcome {
        CaptureOutcome::Conflict {
            id,
            baseline_owner,
            observed_owner,
        } => {
            assert_eq!(id, 7);
            assert_eq!(baseline_owner, None);
            assert_eq!(observed_owner, Some(Faction::Blue));
        }
        other => panic!("expected conflict, got {other:?}"),
    }

    // The judging verdict was PASS, yet nothing may be written.
    assert_eq!(h.judge_calls.load(Ordering::SeqCst), 1);
    assert!(h.store.saved().is_empty());
    assert!(h.replica.published().is_empty());
}

#[tokio::test]
async fn territory_missing_on_reread_is_a_conflict() {
    let before = TerritoryTable::new(vec![hex(7, None, Difficulty::Easy)]);
    let after = TerritoryTable::default();
    let h = harness(vec![before, after], MockReplica::new(), "fizz");

    let outcome = h.service.attack(&red_alice(), 7).await.unwrap();
    assert!(matches!(outcome, CaptureOutcome::Conflict { id: 7, .. }));
    assert!(h.store.saved().is_empty());
}

#[tokio::test]
async fn pull_failure_is_fatal() {
    let table = TerritoryTable::new(vec![hex(7, None, Difficulty::Easy)]);
    let h = harness(vec![table], MockReplica::failing_pull(), "fizz");

    let err = h.service.attack(&red_alice(), 7).await.unwrap_err();
    assert!(matches!(err, GameError::Sync(SyncError::Network { .. })));
    assert_eq!(h.judge_calls.load(Ordering::SeqCst), 0);
    assert!(h.store.saved().is_empty());
}

#[tokio::test]
async fn publish_failure_rolls_the_table_back() {
    let table = TerritoryTable::new(vec![hex(7, None, Difficulty::Easy)]);
    let h = harness(vec![table.clone()], MockReplica::failing_publish(), "fizz");

    let err = h.service.attack(&red_alice(), 7).await.unwrap_err();
    assert!(matches!(
        err,
        GameError::Sync(SyncError::NonFastForward { .. })
    ));

    // Mutated write, then the compensating rollback to the pristine table.
    let saved = h.store.saved();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].find(7).unwrap().owner, Some(Faction::Red));
    assert_eq!(saved[1], table);
}

#[tokio::test]
async fn capture_at_max_tier_saturates() {
    let table = TerritoryTable::new(vec![hex(2, Some(Faction::Blue), Difficulty::Hard)]);
    let h = harness(vec![table], MockReplica::new(), "fizz");

    let outcome = h.service.attack(&red_alice(), 2).await.unwrap();
    match outcome {
        CaptureOutcome::Captured {
            previous_difficulty,
            new_difficulty,
            ..
        } => {
            assert_eq!(previous_difficulty, Difficulty::Hard);
            assert_eq!(new_difficulty, Difficulty::Hard);
        }
        other => panic!("expected capture, got {other:?}"),
    }

    let (_, message) = &h.replica.published()[0];
    assert!(message.contains("hard->hard"));
}

#[tokio::test]
async fn reported_values_match_persisted_values() {
    let table = TerritoryTable::new(vec![hex(7, Some(Faction::Blue), Difficulty::Medium)]);
    let h = harness(vec![table], MockReplica::new(), "fizz");

    let outcome = h.service.attack(&red_alice(), 7).await.unwrap();
    let CaptureOutcome::Captured {
        new_owner,
        new_difficulty,
        ..
    } = outcome
    else {
        panic!("expected capture");
    };

    let written = h.store.saved()[0].find(7).unwrap().clone();
    assert_eq!(Some(new_owner), written.owner);
    assert_eq!(new_difficulty, written.difficulty);
}
