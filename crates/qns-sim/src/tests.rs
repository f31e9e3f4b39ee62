//! Unit tests for qns-sim.

use qns_core::{
    CustomerId, NetworkConfig, ServerId, SimTime, StationConfig, StationId, TerminationPolicy,
    UniformRange,
};

use crate::{
    CustomerStatus, Event, EventKind, EventQueue, NoopObserver, Sim, SimBuilder, SimError,
    SimObserver, stats::RunStats,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn station_cfg(
    name:     &str,
    servers:  usize,
    capacity: usize,
    service:  (f64, f64),
    weights:  Vec<f64>,
) -> StationConfig {
    StationConfig {
        name:            name.into(),
        servers,
        capacity,
        service:         UniformRange::new(service.0, service.1),
        routing_weights: weights,
    }
}

/// A single station routing 100% to exit.
fn single_station(
    servers:     usize,
    capacity:    usize,
    service:     (f64, f64),
    arrival:     (f64, f64),
    termination: TerminationPolicy,
) -> NetworkConfig {
    NetworkConfig {
        stations:      vec![station_cfg("only", servers, capacity, service, vec![0.0, 1.0])],
        arrival:       UniformRange::new(arrival.0, arrival.1),
        first_arrival: arrival.0,
        seed:          Some(1),
        max_customers: 100_000,
        termination,
    }
}

/// The classic three-station tandem/feedback net from the original model:
/// G/G/1 feeding G/G/2/5 and G/G/2/10, stochastic routing everywhere.
fn three_station_config(termination: TerminationPolicy) -> NetworkConfig {
    NetworkConfig {
        stations:      vec![
            station_cfg("front", 1, 100, (1.0, 2.0), vec![0.0, 0.8, 0.2, 0.0]),
            station_cfg("mid", 2, 5, (4.0, 6.0), vec![0.3, 0.0, 0.5, 0.2]),
            station_cfg("back", 2, 10, (5.0, 15.0), vec![0.0, 0.7, 0.0, 0.3]),
        ],
        arrival:       UniformRange::new(2.0, 4.0),
        first_arrival: 2.0,
        seed:          Some(7),
        max_customers: 100_000,
        termination,
    }
}

fn build(config: NetworkConfig) -> Sim {
    SimBuilder::new(config).build().unwrap()
}

fn run(config: NetworkConfig) -> RunStats {
    build(config).run(&mut NoopObserver).unwrap()
}

fn assert_close(a: f64, b: f64, what: &str) {
    assert!((a - b).abs() < 1e-9, "{what}: {a} != {b}");
}

// ── EventQueue ────────────────────────────────────────────────────────────────

mod event_queue {
    use super::*;

    fn arrival(t: f64) -> Event {
        Event { time: SimTime::from_secs(t), kind: EventKind::Arrival }
    }

    fn completion(t: f64, customer: u32) -> Event {
        Event {
            time: SimTime::from_secs(t),
            kind: EventKind::Completion {
                station:  StationId(0),
                server:   ServerId(0),
                customer: CustomerId(customer),
            },
        }
    }

    #[test]
    fn pops_in_time_order() {
        let mut q = EventQueue::new();
        q.schedule(arrival(5.0));
        q.schedule(arrival(1.0));
        q.schedule(arrival(3.0));

        assert_eq!(q.len(), 3);
        assert_eq!(q.next_time(), Some(SimTime::from_secs(1.0)));
        assert_eq!(q.pop_earliest().unwrap().time, SimTime::from_secs(1.0));
        assert_eq!(q.pop_earliest().unwrap().time, SimTime::from_secs(3.0));
        assert_eq!(q.pop_earliest().unwrap().time, SimTime::from_secs(5.0));
        assert!(q.pop_earliest().is_none());
        assert!(q.is_empty());
    }

    #[test]
    fn simultaneous_events_keep_insertion_order() {
        let mut q = EventQueue::new();
        q.schedule(completion(2.0, 0));
        q.schedule(arrival(2.0));
        q.schedule(completion(2.0, 1));

        let kinds: Vec<EventKind> = std::iter::from_fn(|| q.pop_earliest())
            .map(|e| e.kind)
            .collect();
        assert_eq!(kinds.len(), 3);
        assert!(matches!(kinds[0], EventKind::Completion { customer: CustomerId(0), .. }));
        assert_eq!(kinds[1], EventKind::Arrival);
        assert!(matches!(kinds[2], EventKind::Completion { customer: CustomerId(1), .. }));
    }

    #[test]
    fn empty_queue() {
        let mut q = EventQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.next_time(), None);
        assert!(q.pop_earliest().is_none());
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

mod builder {
    use super::*;

    #[test]
    fn rejects_invalid_config() {
        let mut config = single_station(1, 1, (1.0, 1.0), (2.0, 2.0), TerminationPolicy::Drain);
        config.stations[0].servers = 0;
        match SimBuilder::new(config).build() {
            Err(SimError::Core(_)) => {}
            Err(e) => panic!("wrong error kind: {e:?}"),
            Ok(_) => panic!("expected config rejection, build succeeded"),
        }
    }

    #[test]
    fn schedules_first_arrival() {
        let mut config = single_station(1, 1, (1.0, 1.0), (2.0, 2.0), TerminationPolicy::Drain);
        config.first_arrival = 7.5;
        let sim = build(config);
        assert_eq!(sim.events.next_time(), Some(SimTime::from_secs(7.5)));
        assert_eq!(sim.events.len(), 1);
    }

    #[test]
    fn seed_override_wins() {
        let config = single_station(1, 1, (1.0, 1.0), (2.0, 2.0), TerminationPolicy::Drain);
        let sim = SimBuilder::new(config).seed(99).build().unwrap();
        assert_eq!(sim.seed(), 99);
    }

    #[test]
    fn unseeded_run_is_replayable_from_reported_seed() {
        let mut config =
            single_station(1, 5, (1.0, 2.0), (1.0, 3.0), TerminationPolicy::DrawBudget(500));
        config.seed = None;

        let first = run(config.clone());
        let replay = SimBuilder::new(config)
            .seed(first.seed)
            .build()
            .unwrap()
            .run(&mut NoopObserver)
            .unwrap();
        assert_eq!(first, replay);
    }
}

// ── Deterministic scenarios ───────────────────────────────────────────────────

mod scenarios {
    use super::*;

    /// service(1) < inter-arrival(2): each arrival is served immediately, no
    /// queueing, no losses.  Horizon 10 admits exactly the arrivals at
    /// t = 2, 4, 6, 8, 10; the fifth completion (t = 11) lies beyond the
    /// horizon and stays unresolved.
    #[test]
    fn lockstep_service_never_queues() {
        let config = single_station(1, 1, (1.0, 1.0), (2.0, 2.0), TerminationPolicy::Horizon(10.0));
        let mut sim = build(config);
        let stats = sim.run(&mut NoopObserver).unwrap();

        assert_eq!(sim.customers.len(), 5);
        assert_eq!(stats.served, 4);
        assert_eq!(stats.stations[0].losses, 0);
        assert_close(stats.stations[0].total_waiting, 0.0, "total waiting");
        assert_close(stats.stations[0].mean_waiting(), 0.0, "mean waiting");
        assert_eq!(stats.end_time, SimTime::from_secs(10.0));

        // Every served customer spent exactly its service time in the system.
        assert_close(stats.mean_system_time(), 1.0, "mean system time");

        // Occupancy alternates: idle 2s, busy 1s, four full cycles plus the
        // final busy second truncated by the horizon at t = 10.
        assert_close(stats.stations[0].occupancy_time[0], 6.0, "time at occupancy 0");
        assert_close(stats.stations[0].occupancy_time[1], 4.0, "time at occupancy 1");
    }

    /// capacity 0, service(5) >> inter-arrival(1): the first arrival seizes
    /// the only server; every later arrival within the horizon is lost.
    #[test]
    fn no_waiting_room_loses_all_but_first() {
        let config = single_station(1, 0, (5.0, 5.0), (1.0, 1.0), TerminationPolicy::Horizon(5.0));
        let mut sim = build(config);
        let stats = sim.run(&mut NoopObserver).unwrap();

        let arrivals = sim.customers.len() as u64;
        assert_eq!(arrivals, 5);
        assert_eq!(stats.stations[0].losses, arrivals - 1);
        assert_eq!(stats.served, 0);
        assert_eq!(stats.stations[0].processed, 0);

        let statuses: Vec<CustomerStatus> = sim.customers.iter().map(|c| c.status).collect();
        assert_eq!(statuses[0], CustomerStatus::InSystem); // still in service
        assert!(statuses[1..].iter().all(|s| *s == CustomerStatus::Lost));
    }

    /// All-zero outgoing weights default to exit, and crucially do so without
    /// consuming a variate — observable in the draw count.
    #[test]
    fn zero_weights_exit_without_a_draw() {
        let config = NetworkConfig {
            stations:      vec![
                station_cfg("a", 1, 1, (1.0, 1.0), vec![0.0, 0.0, 0.0]),
                station_cfg("b", 1, 1, (1.0, 1.0), vec![0.0, 0.0, 1.0]),
            ],
            arrival:       UniformRange::new(2.0, 2.0),
            first_arrival: 2.0,
            seed:          Some(1),
            max_customers: 100_000,
            termination:   TerminationPolicy::Horizon(10.0),
        };
        let mut sim = build(config);
        let stats = sim.run(&mut NoopObserver).unwrap();

        // 5 arrivals × (1 service draw + 1 gap draw); zero routing draws.
        assert_eq!(stats.draws, 10);
        assert_eq!(stats.served, 4);
        assert_eq!(stats.stations[1].processed, 0);
        assert!(sim.customers.iter().all(|c| c.visits[1] == 0));
    }

    /// Station A routes 100% to exit: B and C never see an A-customer, and
    /// every A-departure is archived served with its exact system time.
    #[test]
    fn full_exit_station_bypasses_the_rest() {
        let config = NetworkConfig {
            stations:      vec![
                station_cfg("a", 1, 50, (1.0, 2.0), vec![0.0, 0.0, 0.0, 1.0]),
                station_cfg("b", 2, 5, (4.0, 6.0), vec![0.0, 0.0, 0.0, 1.0]),
                station_cfg("c", 2, 10, (5.0, 15.0), vec![0.0, 0.0, 0.0, 1.0]),
            ],
            arrival:       UniformRange::new(2.0, 4.0),
            first_arrival: 2.0,
            seed:          Some(42),
            max_customers: 100_000,
            termination:   TerminationPolicy::Horizon(200.0),
        };
        let mut sim = build(config);
        let stats = sim.run(&mut NoopObserver).unwrap();

        assert!(stats.served > 0);
        assert_eq!(stats.stations[1].processed, 0);
        assert_eq!(stats.stations[2].processed, 0);

        for c in sim.customers.iter() {
            assert_eq!(c.visits[1], 0, "customer {} reached station b", c.id);
            assert_eq!(c.visits[2], 0, "customer {} reached station c", c.id);
            if c.status == CustomerStatus::Served {
                let total = c.total_system_time.expect("served without system time");
                assert!(total > 0.0);
            } else {
                assert!(c.total_system_time.is_none());
            }
        }

        // B and C spent the whole run empty.
        for station in [1, 2] {
            let occ = &stats.stations[station].occupancy_time;
            assert_close(occ[0], stats.end_time.as_secs(), "empty-station occupancy");
            assert!(occ[1..].iter().all(|&t| t == 0.0));
        }
    }
}

// ── Run-level invariants ──────────────────────────────────────────────────────

mod properties {
    use super::*;

    /// Every station's occupancy buckets sum to the total simulated time.
    #[test]
    fn occupancy_histograms_sum_to_total_time() {
        let stats = run(three_station_config(TerminationPolicy::DrawBudget(10_000)));
        let total = stats.end_time.as_secs();
        assert!(total > 0.0);
        for (i, station) in stats.stations.iter().enumerate() {
            let sum = station.total_occupancy_time();
            assert!(
                (sum - total).abs() < 1e-6,
                "station {i}: bucket sum {sum} != total time {total}"
            );
        }
    }

    /// Occupancy fractions of each station sum to 1.
    #[test]
    fn occupancy_fractions_sum_to_one() {
        let stats = run(three_station_config(TerminationPolicy::Horizon(500.0)));
        for i in 0..stats.stations.len() {
            let dist = stats.occupancy_distribution(StationId(i as u16));
            let sum: f64 = dist.iter().map(|b| b.fraction).sum();
            assert!((sum - 1.0).abs() < 1e-9, "station {i}: fractions sum to {sum}");
        }
    }

    /// Identical configuration + seed + policy ⇒ bit-identical statistics.
    #[test]
    fn seeded_runs_are_deterministic() {
        let config = three_station_config(TerminationPolicy::DrawBudget(5_000));
        assert_eq!(run(config.clone()), run(config));
    }

    /// Customers pass through a single-server FIFO station in arrival order.
    #[test]
    fn fifo_station_completes_in_join_order() {
        #[derive(Default)]
        struct CompletionLog(Vec<CustomerId>);

        impl SimObserver for CompletionLog {
            fn on_event(&mut self, _time: SimTime, kind: &EventKind) {
                if let EventKind::Completion { customer, .. } = kind {
                    self.0.push(*customer);
                }
            }
        }

        // Arrivals outpace service 3:1, so the waiting line stays loaded.
        let config =
            single_station(1, 10, (3.0, 3.0), (1.0, 1.0), TerminationPolicy::Horizon(30.0));
        let mut log = CompletionLog::default();
        build(config).run(&mut log).unwrap();

        assert!(log.0.len() > 3, "expected several completions, got {}", log.0.len());
        assert!(
            log.0.windows(2).all(|w| w[0] < w[1]),
            "completions out of join order: {:?}",
            log.0
        );
    }

    /// Post-run audit: every in-system customer sits in exactly one server or
    /// one waiting line; terminal customers sit in neither.  Dispositions
    /// account for every arrival.
    #[test]
    fn every_customer_is_in_exactly_one_place() {
        let mut sim = build(three_station_config(TerminationPolicy::DrawBudget(2_000)));
        let stats = sim.run(&mut NoopObserver).unwrap();

        let mut placements = vec![0usize; sim.customers.len()];
        for station in &sim.stations {
            assert!(station.queue_len() <= station.capacity);
            for server in &station.servers {
                if let Some(a) = server.assignment {
                    placements[a.customer.index()] += 1;
                }
            }
            for customer in station.waiting_customers() {
                placements[customer.index()] += 1;
            }
        }

        let mut in_system = 0u64;
        let mut lost = 0u64;
        for c in sim.customers.iter() {
            match c.status {
                CustomerStatus::InSystem => {
                    in_system += 1;
                    assert_eq!(placements[c.id.index()], 1, "customer {} misplaced", c.id);
                }
                CustomerStatus::Served | CustomerStatus::Lost => {
                    if c.status == CustomerStatus::Lost {
                        lost += 1;
                    }
                    assert_eq!(placements[c.id.index()], 0, "terminal customer {} placed", c.id);
                }
            }
        }

        let total_losses: u64 = stats.stations.iter().map(|s| s.losses).sum();
        assert_eq!(lost, total_losses);
        assert_eq!(sim.customers.len() as u64, stats.served + lost + in_system);
    }

    /// The draw-budget policy stops the loop promptly: the final count can
    /// overshoot only by the handful of draws one dispatch consumes.
    #[test]
    fn draw_budget_stops_promptly() {
        let stats = run(three_station_config(TerminationPolicy::DrawBudget(100)));
        assert!(stats.draws >= 100, "stopped early at {} draws", stats.draws);
        assert!(stats.draws <= 102, "overshot budget: {} draws", stats.draws);
    }

    /// An event beyond the horizon is discarded and the clock parks exactly
    /// at the horizon.
    #[test]
    fn horizon_discards_and_parks_the_clock() {
        let mut sim = build(three_station_config(TerminationPolicy::Horizon(100.0)));
        let stats = sim.run(&mut NoopObserver).unwrap();

        assert_eq!(stats.end_time, SimTime::from_secs(100.0));
        // Whatever remains scheduled lies strictly beyond the horizon.
        if let Some(next) = sim.events.next_time() {
            assert!(next.as_secs() > 100.0);
        }
    }

    /// Under the drain policy the run ends with an empty queue and every
    /// arrival resolved: nothing left in-system.
    #[test]
    fn drain_policy_resolves_every_customer() {
        let mut config = three_station_config(TerminationPolicy::Drain);
        config.max_customers = 50;
        let mut sim = build(config);
        let stats = sim.run(&mut NoopObserver).unwrap();

        assert!(sim.events.is_empty());
        assert_eq!(sim.customers.len(), 50);
        let lost: u64 = stats.stations.iter().map(|s| s.losses).sum();
        assert_eq!(stats.served + lost, 50);
        assert!(
            sim.customers.iter().all(|c| c.status != CustomerStatus::InSystem),
            "drained run left customers in-system"
        );
    }

    /// Waiting time accrues only while queued, and lands in both the
    /// customer's and the station's accumulators.
    #[test]
    fn waiting_totals_agree() {
        let config =
            single_station(1, 10, (3.0, 3.0), (1.0, 1.0), TerminationPolicy::Horizon(50.0));
        let mut sim = build(config);
        let stats = sim.run(&mut NoopObserver).unwrap();

        let by_customer: f64 = sim.customers.iter().map(|c| c.waiting[0]).sum();
        assert!(stats.stations[0].total_waiting > 0.0);
        assert_close(by_customer, stats.stations[0].total_waiting, "waiting totals");
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

mod routing {
    use qns_core::VariateSource;

    use crate::routing::{RouteOutcome, pick_destination};

    use super::*;

    #[test]
    fn all_zero_weights_default_to_exit() {
        let mut rng = VariateSource::new(1);
        assert_eq!(pick_destination(&[0.0, 0.0, 0.0], &mut rng), RouteOutcome::Exit);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn certain_destination_always_picked() {
        let mut rng = VariateSource::new(2);
        for _ in 0..100 {
            assert_eq!(
                pick_destination(&[0.0, 5.0, 0.0], &mut rng),
                RouteOutcome::Station(StationId(1))
            );
        }
        assert_eq!(rng.draws(), 100);
    }

    #[test]
    fn last_weight_is_exit() {
        let mut rng = VariateSource::new(3);
        for _ in 0..100 {
            assert_eq!(pick_destination(&[0.0, 0.0, 2.0], &mut rng), RouteOutcome::Exit);
        }
    }

    #[test]
    fn unnormalized_weights_split_by_proportion() {
        // 3:1 split; with 2000 draws the empirical ratio lands well inside
        // a generous tolerance band.
        let mut rng = VariateSource::new(4);
        let mut first = 0u32;
        for _ in 0..2_000 {
            if pick_destination(&[3.0, 0.0, 1.0], &mut rng) == RouteOutcome::Station(StationId(0)) {
                first += 1;
            }
        }
        let share = f64::from(first) / 2_000.0;
        assert!((0.70..0.80).contains(&share), "first-destination share {share}");
    }
}
