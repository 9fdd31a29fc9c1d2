use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use std::{
    collections::HashSet,
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

/// Where the three dig files go relative to the output directory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    /// `dig_ascii.<name>`, `dig_att.<name>`, `dig_cats.<name>`
    #[default]
    Flat,
    /// `dig_ascii/<name>`, `dig_att/<name>`, `dig_cats/<name>` as in a GRASS mapset.
    Mapset,
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Layout::Flat => "flat",
            Layout::Mapset => "mapset",
        };

        f.write_str(s)
    }
}

const PREFIXES: [&str; 3] = ["dig_ascii", "dig_att", "dig_cats"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub ascii: PathBuf,
    pub att: PathBuf,
    pub cats: PathBuf,
}

pub struct DigFiles {
    pub ascii: BufWriter<File>,
    pub att: BufWriter<File>,
    pub cats: BufWriter<File>,
}

impl OutputPaths {
    /// Names the outputs after the input's file stem, e.g. `gshhs_c.b` -> `gshhs_c`.
    pub fn derive(input: &Path, output_dir: &Path, layout: Layout) -> Result<Self> {
        let name = input
            .file_stem()
            .with_context(|| format!("Input path {} has no file name", input.display()))?
            .to_string_lossy();

        let [ascii, att, cats] = PREFIXES.map(|prefix| match layout {
            Layout::Flat => output_dir.join(format!("{prefix}.{name}")),
            Layout::Mapset => output_dir.join(prefix).join(&*name),
        });

        Ok(Self { ascii, att, cats })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [&self.ascii, &self.att, &self.cats].into_iter().map(PathBuf::as_path)
    }

    pub fn any_exists(&self) -> bool {
        self.iter().any(Path::exists)
    }

    /// Creates (truncating) all three files before any input is consumed.
    pub fn create(&self) -> Result<DigFiles> {
        let open = |path: &Path| -> Result<BufWriter<File>> {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Could not create directory {}", parent.display()))?;
            }
            let file = File::create(path)
                .with_context(|| format!("Could not open file {} for writing", path.display()))?;
            Ok(BufWriter::new(file))
        };

        Ok(DigFiles {
            ascii: open(&self.ascii)?,
            att: open(&self.att)?,
            cats: open(&self.cats)?,
        })
    }
}

/// Pairs every input with its outputs, refusing inputs that would share files.
pub fn plan(inputs: &[PathBuf], output_dir: &Path, layout: Layout) -> Result<Vec<(PathBuf, OutputPaths)>> {
    let mut seen = HashSet::new();
    let mut jobs = Vec::with_capacity(inputs.len());

    for input in inputs {
        let outputs = OutputPaths::derive(input, output_dir, layout)?;
        if !seen.insert(outputs.ascii.clone()) {
            bail!(
                "{} would overwrite the outputs of another input ({})",
                input.display(),
                outputs.ascii.display()
            );
        }
        jobs.push((input.clone(), outputs));
    }

    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_layout_uses_dotted_prefixes() {
        let p = OutputPaths::derive(Path::new("/data/gshhs_c.b"), Path::new("out"), Layout::Flat).unwrap();

        assert_eq!(p.ascii, PathBuf::from("out/dig_ascii.gshhs_c"));
        assert_eq!(p.att, PathBuf::from("out/dig_att.gshhs_c"));
        assert_eq!(p.cats, PathBuf::from("out/dig_cats.gshhs_c"));
    }

    #[test]
    fn mapset_layout_uses_sub_directories() {
        let p = OutputPaths::derive(Path::new("gshhs_h.b"), Path::new("mapset"), Layout::Mapset).unwrap();

        assert_eq!(p.ascii, PathBuf::from("mapset/dig_ascii/gshhs_h"));
        assert_eq!(p.cats, PathBuf::from("mapset/dig_cats/gshhs_h"));
    }

    #[test]
    fn only_final_extension_is_stripped() {
        let p = OutputPaths::derive(Path::new("shore.v15.b"), Path::new("."), Layout::Flat).unwrap();
        assert_eq!(p.att, PathBuf::from("./dig_att.shore.v15"));
    }

    #[test]
    fn plan_rejects_colliding_stems() {
        let inputs = vec![PathBuf::from("a/gshhs_c.b"), PathBuf::from("b/gshhs_c.b")];
        assert!(plan(&inputs, Path::new("."), Layout::Flat).is_err());

        let inputs = vec![PathBuf::from("gshhs_c.b"), PathBuf::from("gshhs_l.b")];
        assert_eq!(plan(&inputs, Path::new("."), Layout::Flat).unwrap().len(), 2);
    }

    #[test]
    fn create_makes_mapset_directories() {
        let dir = tempfile::tempdir().unwrap();
        let p = OutputPaths::derive(Path::new("gshhs_c.b"), dir.path(), Layout::Mapset).unwrap();
        assert!(!p.any_exists());

        drop(p.create().unwrap());
        assert!(p.iter().all(Path::exists));
    }
}
