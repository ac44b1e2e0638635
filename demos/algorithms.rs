// demos/algorithms.rs
//! Runs the preset algorithm circuits through every engine
//!
//! Run with `cargo run --example algorithms`.

use quasim::quantum::{presets, CircuitBuilder};
use quasim::{Engine, Mode, Simulator, SimulatorConfig};

fn main() {
    println!("Quantum Circuit Simulation Example");
    println!("==================================\n");

    let mut simulator = Simulator::new(SimulatorConfig::deterministic(2024)).unwrap();

    // Bell pair
    let mut builder = CircuitBuilder::new(2);
    builder.h(0, 0).unwrap().cnot(0, 1, 1).unwrap();
    let bell = builder.build();

    println!("Bell circuit:");
    print!("{}", bell.compact());
    let outcome = simulator
        .simulate(Mode::WholeCircuit, Engine::Matrix, 2, &bell)
        .unwrap();
    println!("\n{}", outcome);

    let outcome = simulator
        .simulate(Mode::WholeCircuit, Engine::Reference, 2, &bell)
        .unwrap();
    println!("Sampled:\n{}", outcome);

    // Deutsch's algorithm, the oracle is drawn on every run
    let deutsch = presets::deutsch().unwrap();
    println!("Deutsch circuit:");
    print!("{}", deutsch.compact());
    for run in 0..4 {
        let outcome = simulator.simulate_whole_circuit(2, &deutsch, Engine::Matrix).unwrap();
        if let Some(result) = outcome.as_probabilities() {
            let verdict = match result.probability_of("|11⟩") {
                Some(p) if p > 0.5 => "balanced",
                _ => "constant",
            };
            println!("run {}: oracle is {}", run, verdict);
        }
    }

    // Grover search for |10⟩
    let grover = presets::grover([true, false]).unwrap();
    println!("\nGrover circuit:");
    print!("{}", grover.compact());
    let outcome = simulator.simulate_whole_circuit(3, &grover, Engine::Matrix).unwrap();
    println!("\n{}", outcome);

    // Lanes in isolation
    let mut builder = CircuitBuilder::new(3);
    builder
        .h(0, 0)
        .unwrap()
        .x(1, 0)
        .unwrap()
        .t(1, 1)
        .unwrap()
        .y(2, 1)
        .unwrap();
    let lanes = builder.build();

    for engine in [Engine::Matrix, Engine::TruthTable] {
        let outcome = simulator
            .simulate(Mode::SingleLane, engine, 3, &lanes)
            .unwrap();
        println!("Lane states ({} engine):\n{}", engine, outcome);
    }
}
