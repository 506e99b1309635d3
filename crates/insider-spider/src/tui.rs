use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// A progress bar over `len` items, or a hidden one outside of the tui.
pub(crate) fn progress_bar(len: usize, msg: &'static str, tui: bool) -> ProgressBar {
    if !tui {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{msg:>18.white} {spinner:.magenta} |{bar:40.cyan/blue}| {pos:<3} / {human_len} \
        [Time: {elapsed}, ETA: {eta:.blue}]",
    ) {
        pb.set_style(style.progress_chars("##-"));
    }
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Section header printed above each stage of the pipeline.
pub(crate) fn banner(name: &str, tui: bool) {
    if tui {
        println!(
            "{bar}\n{name:^40}\n{bar}",
            bar = "=".repeat(40),
            name = name
        );
    }
}
