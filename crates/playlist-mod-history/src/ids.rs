/// Song id generators.
///
/// The reducer never reads the clock itself; it asks an `IdGenerator`
/// for every new song, so tests can run against a deterministic sequence.
use playlist_config::IdStrategy;

/// Source of unique song identifiers.
pub trait IdGenerator {
    /// Returns an id never returned before by this generator.
    fn next_id(&mut self) -> String;
}

/// Monotonic counter: `song-0`, `song-1`, ...
#[derive(Debug, Default, Clone)]
pub struct SequenceIds {
    next: u64,
}

impl SequenceIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts counting at `next` instead of zero.
    pub fn starting_at(next: u64) -> Self {
        Self { next }
    }
}

impl IdGenerator for SequenceIds {
    fn next_id(&mut self) -> String {
        let id = self.next;
        self.next += 1;
        format!("song-{id}")
    }
}

/// Wall-clock milliseconds since the Unix epoch.
///
/// Two ids requested within the same millisecond (or after the clock steps
/// backwards) get `last + 1`, so the sequence is strictly increasing.
pub struct TimestampIds {
    clock: Box<dyn FnMut() -> i64>,
    last: i64,
}

impl std::fmt::Debug for TimestampIds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimestampIds")
            .field("last", &self.last)
            .finish()
    }
}

impl Default for TimestampIds {
    fn default() -> Self {
        Self::new()
    }
}

impl TimestampIds {
    pub fn new() -> Self {
        Self::with_clock(|| chrono::Utc::now().timestamp_millis())
    }

    /// Uses `clock` instead of the system time.
    pub fn with_clock(clock: impl FnMut() -> i64 + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            last: i64::MIN,
        }
    }
}

impl IdGenerator for TimestampIds {
    fn next_id(&mut self) -> String {
        let now = (self.clock)();
        let id = if now > self.last { now } else { self.last + 1 };
        self.last = id;
        id.to_string()
    }
}

/// Random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Builds the generator selected in the configuration.
pub fn generator_for(strategy: IdStrategy) -> Box<dyn IdGenerator> {
    match strategy {
        IdStrategy::Sequence => Box::new(SequenceIds::new()),
        IdStrategy::Timestamp => Box::new(TimestampIds::new()),
        IdStrategy::Uuid => Box::new(UuidIds),
    }
}
