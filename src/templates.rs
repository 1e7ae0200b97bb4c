use std::{
    fs,
    path::{Path, PathBuf},
};

use minijinja::{AutoEscape, Environment, ErrorKind};

use crate::{
    data::PageData,
    error::{Error, Result},
};

/// the templates associated with the site
///
/// templates are loaded lazily from the templates directory, so a page can extend or include
/// any other file in there
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new<T: AsRef<Path>>(template_dir: T) -> Self {
        let mut env = Environment::new();
        env.set_loader(dir_loader(template_dir.as_ref().to_path_buf()));
        // output is written as is, whatever the extension of the page
        env.set_auto_escape_callback(|_| AutoEscape::None);
        Self { env }
    }

    /// render the template named `page_name` with `data` as its context
    pub fn render(&self, page_name: &str, data: &PageData) -> Result<String> {
        let template = self.env.get_template(page_name).map_err(|err| {
            if err.kind() == ErrorKind::TemplateNotFound {
                Error::TemplateNotFound(page_name.into())
            } else {
                err.into()
            }
        })?;
        Ok(template.render(data)?)
    }
}

/// load templates by joining their `/` separated name onto `dir`
///
/// unlike `minijinja::path_loader` dotfiles are allowed, only `..` is refused so lookups stay
/// inside `dir`
fn dir_loader(
    dir: PathBuf,
) -> impl Fn(&str) -> std::result::Result<Option<String>, minijinja::Error> + Send + Sync + 'static
{
    move |name| {
        let mut path = dir.clone();
        for segment in name.split('/') {
            match segment {
                "" | "." => {}
                ".." => return Ok(None),
                segment => path.push(segment),
            }
        }
        if !path.is_file() {
            return Ok(None);
        }
        fs::read_to_string(&path).map(Some).map_err(|err| {
            minijinja::Error::new(
                ErrorKind::InvalidOperation,
                format!("could not read template {path:?}"),
            )
            .with_source(err)
        })
    }
}
