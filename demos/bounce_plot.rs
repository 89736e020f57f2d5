//! Plot out a small bounce bank in both modes
//!
//! Look in /images/ for the resulting plot.
//!
//! Requires plotters lib: https://docs.rs/plotters/latest/plotters/. Tested on an Ubuntu machine.

use bounce_bounds::{BlockInputs, Bounce, Mode};
use plotters::prelude::*;

const NUM_VOICES: usize = 3;
const BLOCK: usize = 64;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sample_rate = 48_000.0_f64;

    // plot 50 milliseconds
    let num_blocks = (sample_rate * 0.05) as usize / BLOCK;
    let num_points = num_blocks * BLOCK;

    let root = BitMapBackend::new("images/bounce_example_plot_0.png", (640, 640)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled("Bounds and Bounce", ("sans-serif", 40))?;

    let sub_areas = root.split_evenly((2, 1));

    let details = [(Mode::Ptr, "PTR"), (Mode::Waveshape, "Waveshaped")];
    let colors = [RED, GREEN, BLUE];

    for (idx, area) in (0..).zip(sub_areas.iter()) {
        let mut bank = Bounce::new(NUM_VOICES, -1.0, 1.0, details[idx].0, sample_rate);
        bank.set_frequency(0, 110.0)?;
        bank.set_frequency(1, 175.0)?;
        bank.set_frequency(2, 240.0)?;
        bank.set_symmetry(1, 0.3)?;
        bank.set_shape(0, 0.8)?;
        bank.set_shape(2, -0.8)?;
        bank.set_cross_mod(2, 0, 1.0)?;

        // run the whole plot up front, one trace per voice
        let mut traces = vec![Vec::with_capacity(num_points); NUM_VOICES];
        let mut bufs = [[0.0_f64; BLOCK]; NUM_VOICES];
        for _ in 0..num_blocks {
            let [a, b, c] = &mut bufs;
            bank.process_block(&BlockInputs::default(), &mut [&mut a[..], &mut b[..], &mut c[..]], BLOCK)?;
            for (trace, buf) in traces.iter_mut().zip(bufs.iter()) {
                trace.extend_from_slice(buf);
            }
        }

        let mut chart = ChartBuilder::on(area)
            .caption(details[idx].1, ("sans-serif", 15).into_font())
            .x_label_area_size(40)
            .y_label_area_size(40)
            .build_cartesian_2d(0f64..0.05f64, -1.25f64..1.25f64)?;

        chart
            .configure_mesh()
            .x_desc("Time")
            .y_desc("Amplitude")
            .draw()?;

        for (trace, color) in traces.iter().zip(colors.iter()) {
            chart.draw_series(LineSeries::new(
                trace
                    .iter()
                    .enumerate()
                    .map(|(x, &y)| (x as f64 / sample_rate, y)),
                *color,
            ))?;
        }
    }

    root.present()?;

    Ok(())
}
