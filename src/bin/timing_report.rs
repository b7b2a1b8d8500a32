#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]

//! Times bulk operations on both tables and writes a text report plus a chart.
//!
//! Usage: `timing_report [REPORT_PATH]` (defaults to `timing_report.txt`).

use std::{
    collections::HashMap,
    env,
    error::Error,
    fs::File,
    io::{BufWriter, Write},
    time::Instant,
};

use plotters::prelude::*;
use primehash::{ChainingHash, HashTable, ProbingHash};
use rand::Rng;

const DEFAULT_REPORT_PATH: &str = "timing_report.txt";
const CHART_PATH: &str = "insert_timing.png";
const STARTING_CAPACITY: usize = 101;
const SCENARIO_KEYS: i32 = 100_000;
// Key counts for the random-key insert sweep
const SWEEP_SIZES: [usize; 8] = [1_000, 5_000, 10_000, 25_000, 50_000, 100_000, 200_000, 400_000];
const SERIES: [&str; 3] = ["Chaining", "Probing", "std HashMap"];

fn write_stats<T: HashTable<i32, i32>>(out: &mut impl Write, table: &T) -> std::io::Result<()> {
    writeln!(
        out,
        "current size: {} bucket count: {} load factor: {}",
        table.size(),
        table.bucket_count(),
        table.load_factor()
    )
}

// Sequential inserts, one lookup, one erase, one more lookup, then clear
fn run_scenario<T: HashTable<i32, i32>>(
    name: &str,
    table: &mut T,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    writeln!(out, "{name}")?;
    write_stats(out, table)?;

    let begin = Instant::now();
    for key in 0..SCENARIO_KEYS {
        if !table.insert(key, key) {
            return Err(format!("{name}: key {key} was rejected as a duplicate").into());
        }
    }
    writeln!(out, "insert {SCENARIO_KEYS} keys took {}us", begin.elapsed().as_micros())?;

    let begin = Instant::now();
    let found = *table.access(97);
    writeln!(out, "access 97 took {}us", begin.elapsed().as_micros())?;
    if found != 97 {
        return Err(format!("{name}: access(97) returned {found}").into());
    }

    let begin = Instant::now();
    table.erase(&97);
    writeln!(out, "erase 97 took {}us", begin.elapsed().as_micros())?;

    let begin = Instant::now();
    let found = *table.access(10_000);
    writeln!(out, "access 10000 took {}us", begin.elapsed().as_micros())?;
    if found != 10_000 {
        return Err(format!("{name}: access(10000) returned {found}").into());
    }

    write_stats(out, table)?;
    table.clear();
    log::info!("{name}: scenario finished");
    Ok(())
}

fn time_inserts<T: HashTable<u64, u64>>(mut table: T, keys: &[u64]) -> f64 {
    let begin = Instant::now();
    for &key in keys {
        table.insert(key, key);
    }
    begin.elapsed().as_secs_f64() * 1_000.0
}

fn time_std_inserts(keys: &[u64]) -> f64 {
    let mut map = HashMap::new();
    let begin = Instant::now();
    for &key in keys {
        map.entry(key).or_insert(key);
    }
    begin.elapsed().as_secs_f64() * 1_000.0
}

fn draw_chart(timings: &[Vec<f64>]) -> Result<(), Box<dyn Error>> {
    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50), // red
        RGBColor(50, 90, 220), // blue
        RGBColor(50, 180, 50), // green
    ];

    let root = BitMapBackend::new(CHART_PATH, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_time = timings
        .iter()
        .flat_map(|series| series.iter())
        .fold(0.0, |max, &x| if x > max { x } else { max }) *
        1.1; // Add 10% margin

    let x_labels: Vec<String> = SWEEP_SIZES.iter().map(|n| n.to_string()).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption("Insert Time by Collision Strategy", (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..(SWEEP_SIZES.len() - 1), 0.0..max_time)?;

    chart
        .configure_mesh()
        .x_labels(SWEEP_SIZES.len())
        .x_label_formatter(&|x| x_labels.get(*x).cloned().unwrap_or_default())
        .x_desc("Number of Random Keys Inserted")
        .y_desc("Total Insert Time (ms)")
        .axis_desc_style((font_family, 16))
        .draw()?;

    for (series_idx, &name) in SERIES.iter().enumerate() {
        let color = colors[series_idx % colors.len()];
        let line_style = ShapeStyle::from(&color).stroke_width(2);

        chart
            .draw_series(LineSeries::new(
                timings[series_idx].iter().enumerate().map(|(i, &ms)| (i, ms)),
                line_style,
            ))?
            .label(name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            timings[series_idx].iter().enumerate().map(|(i, &ms)| Circle::new((i, ms), 4, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let report_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_REPORT_PATH.to_string());
    let mut out = BufWriter::new(File::create(&report_path)?);

    let mut chaining = ChainingHash::with_capacity(STARTING_CAPACITY);
    let mut probing = ProbingHash::with_capacity(STARTING_CAPACITY);
    run_scenario("chaining", &mut chaining, &mut out)?;
    run_scenario("probing", &mut probing, &mut out)?;

    let mut rng = rand::rng();
    let max_keys = SWEEP_SIZES[SWEEP_SIZES.len() - 1];
    let keys: Vec<u64> = (0..max_keys).map(|_| rng.random()).collect();

    let mut timings: Vec<Vec<f64>> = vec![Vec::new(); SERIES.len()];
    for &n_keys in &SWEEP_SIZES {
        let sample = &keys[..n_keys];
        timings[0].push(time_inserts(ChainingHash::with_capacity(STARTING_CAPACITY), sample));
        timings[1].push(time_inserts(ProbingHash::with_capacity(STARTING_CAPACITY), sample));
        timings[2].push(time_std_inserts(sample));

        writeln!(
            out,
            "random sweep {n_keys} keys: chaining {:.3}ms probing {:.3}ms std {:.3}ms",
            timings[0][timings[0].len() - 1],
            timings[1][timings[1].len() - 1],
            timings[2][timings[2].len() - 1]
        )?;
    }
    out.flush()?;

    draw_chart(&timings)?;
    println!("Wrote {report_path} and {CHART_PATH}");

    Ok(())
}
