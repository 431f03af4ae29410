//! Ten-second countdown printing once a second.
//!
//!     cargo run --example countdown

use anyhow::Result;
use interval_timer::{EventKind, Timer, TimerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let timer = Timer::new(
        TimerConfig::default()
            .with_start_time(10_000)
            .with_end_time(0)
            .with_countdown(true)
            .with_update_frequency(1_000),
    )?;

    let (done_tx, done_rx) = async_channel::bounded(1);

    timer.on(EventKind::Update, |event| {
        println!("{} seconds remaining...", event.time.seconds_total);
    });
    timer.on(EventKind::End, move |_event| {
        println!("The timer has finished!");
        let _ = done_tx.try_send(());
    });

    timer.start();
    done_rx.recv().await?;
    Ok(())
}
