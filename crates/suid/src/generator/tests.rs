use crate::{
    Base32Ext, Error, Group, Guid, GuidGenerator, Id, IdGenerator, SequenceAllocator, Suid,
    SuidGenerator, TimeSource,
};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::scope;

const SCENARIO_SECS: u64 = 1_745_400_001;

#[derive(Debug)]
struct MockTime {
    micros: u64,
}

impl TimeSource for MockTime {
    fn current_micros(&self) -> u64 {
        self.micros
    }
}

/// A clock that advances by one microsecond on every read.
#[derive(Debug)]
struct StepTime {
    micros: AtomicU64,
}

impl TimeSource for StepTime {
    fn current_micros(&self) -> u64 {
        self.micros.fetch_add(1, Ordering::Relaxed)
    }
}

fn fixed(secs: u64) -> MockTime {
    MockTime {
        micros: secs * 1_000_000,
    }
}

fn run_ids_are_unique_across_threads<G>(generator: &G, per_thread: usize)
where
    G: IdGenerator + Sync,
    G::Id: Send,
{
    let threads = num_cpus::get().clamp(2, 8);
    let ids: Vec<G::Id> = scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                s.spawn(|| {
                    (0..per_thread)
                        .map(|_| generator.next_id())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    let unique: HashSet<_> = ids.iter().copied().collect();
    assert_eq!(unique.len(), threads * per_thread);
}

#[test]
fn suid_scenario_generation() {
    let sequence = Arc::new(SequenceAllocator::starting_at(Suid::MAX_SEQUENCE, 5));
    let generator = SuidGenerator::with_allocator(3, fixed(SCENARIO_SECS), sequence).unwrap();
    let id = generator.next_id();
    assert_eq!(id.to_raw(), (SCENARIO_SECS << 30) | (5 << 8) | 3);
    assert_eq!(id.time(), SCENARIO_SECS);
    assert_eq!(id.sequence(), 5);
    assert_eq!(id.host(), 3);
    assert!(id.verify());

    let text = id.encode();
    assert_eq!(text.as_str().len(), 13);
    assert_eq!(Suid::decode(text).unwrap(), id);
}

#[test]
fn suid_host_is_fixed_and_sequence_increments() {
    let generator = SuidGenerator::new(200, fixed(SCENARIO_SECS)).unwrap();
    assert_eq!(generator.host(), 200);
    let ids: Vec<Suid> = (0..4).map(|_| generator.next_id()).collect();
    for (i, id) in ids.iter().enumerate() {
        assert_eq!(id.host(), 200);
        assert_eq!(id.time(), SCENARIO_SECS);
        assert_eq!(id.sequence(), i as u64);
    }
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn guid_uses_microseconds_and_group() {
    let clock = MockTime {
        micros: Guid::TIME_FLOOR + 10,
    };
    let generator = GuidGenerator::new(Guid::MAX_HOST, clock).unwrap();
    let a = generator.next_id();
    let b = generator.next_id_in(Group::new(6).unwrap());
    assert_eq!(a.group(), 0);
    assert_eq!(b.group(), 6);
    assert_eq!(a.time(), Guid::TIME_FLOOR + 10);
    assert_eq!((a.sequence(), b.sequence()), (0, 1));
    assert_eq!(b.host(), Guid::MAX_HOST);
    assert!(a.verify() && b.verify());
}

#[test]
fn invalid_host_is_rejected_at_construction() {
    assert_eq!(
        SuidGenerator::new(256, fixed(0)).unwrap_err(),
        Error::InvalidHost {
            host: 256,
            max: 255
        }
    );
    assert_eq!(
        GuidGenerator::new(128, fixed(0)).unwrap_err(),
        Error::InvalidHost {
            host: 128,
            max: 127
        }
    );
}

#[test]
fn invalid_group_is_rejected_without_consuming_a_sequence() {
    let generator = GuidGenerator::new(1, fixed(SCENARIO_SECS)).unwrap();
    assert_eq!(
        generator.try_next_id_in(8),
        Err(Error::InvalidGroup { group: 8, max: 7 })
    );
    let id = generator.try_next_id_in(7).unwrap();
    assert_eq!(id.group(), 7);
    assert_eq!(id.sequence(), 0);
}

#[test]
fn groups_share_one_allocator() {
    let generator = GuidGenerator::new(1, fixed(SCENARIO_SECS)).unwrap();
    let seqs: Vec<u64> = (0..=Group::MAX)
        .map(|g| generator.next_id_in(Group::new(g).unwrap()).sequence())
        .collect();
    assert_eq!(seqs, (0..8).collect::<Vec<u64>>());
}

#[test]
fn generators_can_share_an_allocator() {
    let sequence = Arc::new(SequenceAllocator::new(Suid::MAX_SEQUENCE));
    let a = SuidGenerator::with_allocator(1, fixed(SCENARIO_SECS), Arc::clone(&sequence)).unwrap();
    let b = SuidGenerator::with_allocator(2, fixed(SCENARIO_SECS), Arc::clone(&sequence)).unwrap();
    assert_eq!(a.next_id().sequence(), 0);
    assert_eq!(b.next_id().sequence(), 1);
    assert_eq!(a.next_id().sequence(), 2);
    assert!(Arc::ptr_eq(a.allocator(), b.allocator()));
}

#[test]
fn suid_ids_unique_across_threads() {
    let generator = SuidGenerator::new(7, fixed(SCENARIO_SECS)).unwrap();
    run_ids_are_unique_across_threads(&generator, 10_000);
}

#[test]
fn guid_ids_unique_across_threads() {
    let generator = GuidGenerator::new(7, fixed(SCENARIO_SECS)).unwrap();
    run_ids_are_unique_across_threads(&generator, 10_000);
}

#[test]
fn guid_sequence_wraps_and_collides_within_one_tick() {
    let generator = GuidGenerator::new(3, fixed(SCENARIO_SECS)).unwrap();
    let capacity = Guid::MAX_SEQUENCE + 1;

    let first = generator.next_id();
    let mut seen = HashSet::new();
    seen.insert(first);
    for _ in 1..capacity {
        assert!(seen.insert(generator.next_id()));
    }
    // The counter is free-running: id number capacity + 1 repeats the first.
    let repeated = generator.next_id();
    assert_eq!(repeated.sequence(), 0);
    assert_eq!(repeated, first);
}

#[test]
fn suid_sequence_wraps_and_collides_within_one_second() {
    let generator = SuidGenerator::new(3, fixed(SCENARIO_SECS)).unwrap();
    let first = generator.next_id();
    let mut last = first;
    for _ in 0..=Suid::MAX_SEQUENCE {
        last = generator.next_id();
    }
    assert_eq!(last.sequence(), 0);
    assert_eq!(last, first);
}

#[test]
fn allocator_wider_than_sequence_field_is_rejected() {
    let wide = Arc::new(SequenceAllocator::starting_at(200_000, 131_072));
    assert_eq!(
        GuidGenerator::with_allocator(1, fixed(SCENARIO_SECS), wide).unwrap_err(),
        Error::InvalidSequence {
            modulus: 200_001,
            capacity: Guid::MAX_SEQUENCE + 1,
        }
    );

    let wide = Arc::new(SequenceAllocator::new(Suid::MAX_SEQUENCE + 1));
    assert!(matches!(
        SuidGenerator::with_allocator(1, fixed(SCENARIO_SECS), wide),
        Err(Error::InvalidSequence { .. })
    ));

    // A narrower allocator only shrinks the sequence space.
    let narrow = Arc::new(SequenceAllocator::new(3));
    let generator = GuidGenerator::with_allocator(1, fixed(SCENARIO_SECS), narrow).unwrap();
    let seqs: Vec<u64> = (0..5).map(|_| generator.next_id().sequence()).collect();
    assert_eq!(seqs, [0, 1, 2, 3, 0]);
}

#[test]
fn suid_sequence_wraps_at_field_capacity() {
    let sequence = Arc::new(SequenceAllocator::starting_at(
        Suid::MAX_SEQUENCE,
        Suid::MAX_SEQUENCE - 1,
    ));
    let generator = SuidGenerator::with_allocator(1, fixed(SCENARIO_SECS), sequence).unwrap();
    let seqs: Vec<u64> = (0..4).map(|_| generator.next_id().sequence()).collect();
    assert_eq!(seqs, [Suid::MAX_SEQUENCE - 1, Suid::MAX_SEQUENCE, 0, 1]);
}

#[test]
fn advancing_clock_sorts_ids_and_text() {
    let clock = StepTime {
        micros: AtomicU64::new(Guid::TIME_FLOOR),
    };
    let generator = GuidGenerator::new(5, clock).unwrap();
    let ids: Vec<Guid> = (0..1_000).map(|_| generator.next_id()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));

    let texts: Vec<String> = ids.iter().map(ToString::to_string).collect();
    let mut sorted = texts.clone();
    sorted.sort();
    assert_eq!(texts, sorted);
}

#[test]
fn earlier_second_sorts_first_regardless_of_sequence() {
    let late = SuidGenerator::new(0, fixed(SCENARIO_SECS + 1)).unwrap();
    let early = SuidGenerator::with_allocator(
        255,
        fixed(SCENARIO_SECS),
        Arc::new(SequenceAllocator::starting_at(
            Suid::MAX_SEQUENCE,
            Suid::MAX_SEQUENCE,
        )),
    )
    .unwrap();
    let (a, b) = (early.next_id(), late.next_id());
    assert!(a < b);
    assert!(a.encode().as_str() < b.encode().as_str());
}

#[test]
fn time_past_field_capacity_wraps() {
    let generator = SuidGenerator::new(0, fixed(Suid::MAX_TIME + 3)).unwrap();
    let id = generator.next_id();
    assert_eq!(id.time(), 2);
    assert!(id.is_valid());
}

#[test]
fn generated_ids_roundtrip_through_text() {
    let suids = SuidGenerator::new(9, fixed(SCENARIO_SECS)).unwrap();
    let guids = GuidGenerator::new(9, fixed(SCENARIO_SECS)).unwrap();
    for _ in 0..100 {
        let s = suids.next_id();
        assert_eq!(s.to_string().parse::<Suid>().unwrap(), s);
        let g = guids.next_id();
        assert_eq!(g.to_string().parse::<Guid>().unwrap(), g);
    }
}
