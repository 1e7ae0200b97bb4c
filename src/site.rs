// A build goes through the same steps every time:
//
// wipe the output directory and make it again, so nothing from a previous build survives
//
// render every file directly inside the templates directory with the data from its `.toml` file
// in the data directory, writing the result under the same name in the output directory
//
// copy the static directory over the output, static files win over rendered pages with the
// same name
use std::{
    fs, io,
    path::Path,
    time::{Duration, Instant},
};

use crate::{config::Config, data::resolve_data, error::Result, templates::Renderer, utils};

/// the state needed for one build of the site
pub struct Site {
    config: Config,
    renderer: Renderer,
}

/// what a finished build did
#[derive(Debug)]
pub struct BuildSummary {
    /// the rendered pages, in the order they were written
    pub pages: Vec<String>,
    pub elapsed: Duration,
}

impl Site {
    pub fn new(config: Config) -> Self {
        let renderer = Renderer::new(&config.templates_dir);
        Self { config, renderer }
    }

    pub fn build(&self) -> Result<BuildSummary> {
        self.build_since(Instant::now())
    }

    /// build the site, reporting the time taken since `start`
    pub fn build_since(&self, start: Instant) -> Result<BuildSummary> {
        let config = &self.config;
        log::info!("Start building {}", config.name);

        clean_out_dir(&config.out_dir)?;

        let pages = list_pages(&config.templates_dir)?;
        for page in &pages {
            self.render_page(page)?;
        }

        log::info!("Copy static files to {:?}", config.out_dir);
        utils::copy_dir(&config.static_dir, &config.out_dir)?;

        let elapsed = start.elapsed();
        log::info!("Done in {:.2} ms", elapsed.as_secs_f64() * 1000.0);
        Ok(BuildSummary { pages, elapsed })
    }

    fn render_page(&self, page: &str) -> Result<()> {
        let data = resolve_data(page, &self.config.data_dir)?;
        log::info!("Render '{page}'");
        let contents = self.renderer.render(page, &data)?;
        fs::write(self.config.out_dir.join(page), contents)?;
        Ok(())
    }
}

/// remove the output directory if it exists and create it empty
pub fn clean_out_dir<T: AsRef<Path>>(out_dir: T) -> io::Result<()> {
    let out_dir = out_dir.as_ref();
    if out_dir.is_dir() {
        log::debug!("Removing {out_dir:?}");
        fs::remove_dir_all(out_dir)?;
    }
    fs::create_dir_all(out_dir)
}

/// names of the regular files directly inside the templates directory, sorted
pub fn list_pages<T: AsRef<Path>>(template_dir: T) -> io::Result<Vec<String>> {
    let mut pages = Vec::new();
    for entry in template_dir.as_ref().read_dir()? {
        let entry = entry?;
        if !entry.path().is_file() {
            log::debug!("Skipping `{:?}` while collecting pages", entry.path());
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => pages.push(name),
            Err(name) => log::warn!("Skipping page with a non utf-8 name: {name:?}"),
        }
    }
    pages.sort();
    Ok(pages)
}
