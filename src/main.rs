use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use gesdro::draw::script::{load_script, replay};
use gesdro::draw::settings_store;
use gesdro::draw::{DirectorySink, DrawingSurface, NoopListeners, PracticeStep, ReferencePhoto};

#[derive(Parser, Debug)]
#[command(
    name = "gesdro",
    about = "Replay a drawing script over a reference photo and export the result"
)]
struct Cli {
    /// Reference photo (PNG).
    reference: PathBuf,

    /// JSON array of drawing actions.
    script: PathBuf,

    /// Export folder. Defaults to the settings' export folder.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Practice step: 1 traces over the photo, 2 draws freehand.
    #[arg(long, default_value_t = 1)]
    step: u8,

    /// Reveal the reference over a step 2 drawing before exporting.
    #[arg(long)]
    overlay: bool,

    /// Photo id used in the export filename. Defaults to the file stem.
    #[arg(long)]
    id: Option<String>,

    /// Settings file. Defaults to gesdro_settings.json next to the binary.
    #[arg(long, env = "GESDRO_SETTINGS")]
    settings: Option<PathBuf>,

    #[arg(long)]
    debug: bool,

    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    gesdro::logging::init(cli.debug, cli.log_file.clone());

    let settings = match &cli.settings {
        Some(path) => settings_store::load_from_path(path)?,
        None => settings_store::load()?,
    };
    let step = PracticeStep::from_number(cli.step)?;
    let id = cli.id.clone().or_else(|| {
        cli.reference
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
    });
    let photo = ReferencePhoto::from_path(id, &cli.reference)?;
    let actions = load_script(&cli.script)?;

    let out_dir = cli
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(&settings.export_dir));

    let mut engine = DrawingSurface::new(settings, Rc::new(NoopListeners));
    engine.load_reference(photo);
    engine.set_step(step);
    replay(&mut engine, &actions).context("replay stroke script")?;
    engine.set_answer_overlay(cli.overlay);

    let mut sink = DirectorySink::new(out_dir);
    let Some(filename) = engine.export(&mut sink) else {
        bail!("export failed; see log for details");
    };
    println!("{}", sink.dir().join(filename).display());
    Ok(())
}
