use std::{fs, io, path::Path};

/// copy everything in `from` into `to`, overwriting files that already exist
pub fn copy_dir(from: impl AsRef<Path>, to: impl AsRef<Path>) -> io::Result<()> {
    fs::create_dir_all(&to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let ty = entry.file_type()?;
        let target = to.as_ref().join(entry.file_name());
        if ty.is_dir() {
            copy_dir(entry.path(), target)?;
        } else {
            log::debug!("Copying {:?} to {target:?}", entry.path());
            fs::copy(entry.path(), target)?;
        }
    }
    Ok(())
}
