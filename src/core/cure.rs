use crate::core::discovery::{contains_wildcard, find_wildcard_files};
use crate::core::expand::expand_wildcard;
use crate::core::instance::locate_instances;
use crate::core::module_table::{build_module_table, module_count};
use crate::core::order::order_connections;
use crate::core::patch::{apply_patches, repair_syntax};
use crate::domain::model::{CureReport, FileBuffer, Module, ModuleTable};
use crate::domain::ports::{ConfigProvider, Storage};
use crate::utils::error::Result;
use std::path::Path;

/// Expands (and optionally reorders) one wildcard instantiation of `module`.
pub fn cure_instance(instance: &str, module: &Module, order: bool) -> Result<String> {
    let expanded = expand_wildcard(instance, module)?;
    if order {
        order_connections(&expanded, module)
    } else {
        Ok(expanded)
    }
}

/// Rewrites every wildcard instantiation of every module in `table` found in
/// `buffer`, then repairs dangling separators. Returns the number of cured
/// instances.
pub fn cure_buffer(buffer: &mut FileBuffer, table: &ModuleTable, order: bool) -> Result<usize> {
    if !contains_wildcard(&buffer.text) {
        return Ok(0);
    }

    let mut cured = 0;
    for module in table.values().flatten() {
        let mut patches = Vec::new();
        for span in locate_instances(&buffer.text, &module.name)? {
            tracing::info!("{} instantiated.", module.name);
            if !span.has_wildcard() {
                continue;
            }
            if module.ports.is_empty() {
                tracing::warn!(
                    "{} declares no recognizable ports, wildcard left in place.",
                    module.name
                );
                continue;
            }
            let replacement = cure_instance(&span.text, module, order)?;
            tracing::info!("Removed wildcard instantiation of {}.", module.name);
            patches.push((span, replacement));
        }
        cured += patches.len();
        apply_patches(buffer, &patches);
    }

    buffer.text = repair_syntax(&buffer.text);
    Ok(cured)
}

/// Convenience wrapper over [`cure_buffer`] for plain text.
pub fn cure_text(content: &str, table: &ModuleTable, order: bool) -> Result<String> {
    let mut buffer = FileBuffer::new("", content.to_string());
    cure_buffer(&mut buffer, table, order)?;
    Ok(buffer.text)
}

pub struct CureEngine<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CureEngine<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn run(&self) -> Result<CureReport> {
        let target = self.config.target_path();
        let root = self.config.search_root();
        let extensions = self.config.extensions();

        let files = find_wildcard_files(&self.storage, target, extensions)?;
        tracing::info!("Found {} file(s) to cure in {}.", files.len(), target.display());

        let mut report = CureReport {
            files_scanned: files.len(),
            ..CureReport::default()
        };
        if files.is_empty() {
            return Ok(report);
        }

        let table = build_module_table(&self.storage, root, extensions)?;
        tracing::info!(
            "Found {} modules in {} file(s) under {}.",
            module_count(&table),
            table.len(),
            root.display()
        );

        for path in &files {
            let cured = self.cure_file(path, &table)?;
            if cured > 0 {
                report.instances_cured += cured;
                report.files_changed.push(path.clone());
            }
        }

        Ok(report)
    }

    fn cure_file(&self, path: &Path, table: &ModuleTable) -> Result<usize> {
        tracing::info!("Trying to cure {}.", path.display());

        let original = self.storage.read_file(path)?;
        let mut buffer = FileBuffer::new(path, original.clone());
        let cured = cure_buffer(&mut buffer, table, self.config.order_ports())?;

        if contains_wildcard(&buffer.text) {
            tracing::warn!(
                "{} still contains a wildcard: no matching module definition was found",
                path.display()
            );
        }

        if buffer.text == original {
            return Ok(cured);
        }
        if self.config.dry_run() {
            tracing::info!("Dry run: {} left untouched.", path.display());
        } else {
            self.storage.write_file(&buffer.path, &buffer.text)?;
        }
        Ok(cured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CureOptions;
    use crate::utils::error::CureError;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    #[derive(Default)]
    struct MockStorage {
        files: RefCell<BTreeMap<PathBuf, String>>,
        writes: RefCell<usize>,
    }

    impl MockStorage {
        fn with(files: &[(&str, &str)]) -> Self {
            let storage = Self::default();
            for (path, content) in files {
                storage
                    .files
                    .borrow_mut()
                    .insert(PathBuf::from(path), content.to_string());
            }
            storage
        }

        fn get_file(&self, path: &str) -> Option<String> {
            self.files.borrow().get(Path::new(path)).cloned()
        }
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &Path) -> Result<String> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                CureError::io(
                    path,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "File not found"),
                )
            })
        }

        fn write_file(&self, path: &Path, content: &str) -> Result<()> {
            *self.writes.borrow_mut() += 1;
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }

        fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
            Ok(self
                .files
                .borrow()
                .keys()
                .filter(|path| path.starts_with(root))
                .cloned()
                .collect())
        }
    }

    const ADDER: &str = r#"module adder (
  input  logic a,
  input  logic b,
  input  logic cin,
  output logic sum,
  output logic cout
);
  assign {cout, sum} = a + b + cin;
endmodule
"#;

    fn table() -> ModuleTable {
        let mut table = ModuleTable::new();
        table.insert(
            PathBuf::from("lib/adder.sv"),
            crate::core::extract::extract_modules(ADDER),
        );
        table
    }

    fn options(order: bool, dry_run: bool) -> CureOptions {
        CureOptions {
            target_path: PathBuf::from("rtl"),
            search_root: PathBuf::from("lib"),
            order_ports: order,
            dry_run,
            ..CureOptions::default()
        }
    }

    #[test]
    fn test_cure_text_without_ordering() {
        let top = "module top;\n  adder u0 (\n    .*,\n    .sum(s1)\n  );\nendmodule\n";
        let cured = cure_text(top, &table(), false).unwrap();

        assert_eq!(
            cured,
            "module top;\n  adder u0 (\n    .a,\n    .b,\n    .cin,\n    .cout,\n    .sum(s1)\n  );\nendmodule\n"
        );
    }

    #[test]
    fn test_cure_text_with_ordering() {
        let top = "module top;\n  adder u0 (\n    .*,\n    .sum(s1),\n    .a(x)\n  );\nendmodule\n";
        let cured = cure_text(top, &table(), true).unwrap();

        assert_eq!(
            cured,
            "module top;\n  adder u0 (\n    .a(x),\n    .b,\n    .cin,\n    .sum(s1),\n    .cout\n  );\nendmodule\n"
        );
    }

    #[test]
    fn test_cure_text_without_wildcard_is_byte_identical() {
        let top = "module top;\n  adder u0 (\n    .a(a),\n  );\nendmodule\n";
        assert_eq!(cure_text(top, &table(), true).unwrap(), top);
    }

    #[test]
    fn test_cure_text_leaves_portless_module_untouched() {
        let mut table = table();
        table.insert(
            PathBuf::from("lib/m.v"),
            crate::core::extract::extract_modules(
                "module m (a, y);\n  input a;\n  output y;\n  assign y = a;\nendmodule\n",
            ),
        );
        assert!(table[&PathBuf::from("lib/m.v")][0].ports.is_empty());

        let top = "module top;\n  m u0 (.*);\nendmodule\n";
        assert_eq!(cure_text(top, &table, false).unwrap(), top);
    }

    #[test]
    fn test_cure_text_inline_instance_fully_connected() {
        let mut table = ModuleTable::new();
        table.insert(
            PathBuf::from("lib/inv.sv"),
            vec![Module::new("inv", vec!["a".to_string(), "y".to_string()])],
        );

        let top = "module top;\n  inv u0 (.a(a), .y(y), .*);\nendmodule\n";
        assert_eq!(
            cure_text(top, &table, false).unwrap(),
            "module top;\n  inv u0 (.a(a), .y(y));\nendmodule\n"
        );
    }

    #[test]
    fn test_cure_text_one_line_instance_with_ordering() {
        let top = "module top;\n  adder u0 (.*);\nendmodule\n";
        assert_eq!(
            cure_text(top, &table(), true).unwrap(),
            "module top;\n  adder u0 (.a,\n.b,\n.cin,\n.sum,\n.cout);\nendmodule\n"
        );
    }

    #[test]
    fn test_cure_text_is_idempotent() {
        let top = "module top;\n  adder u0 (\n    .sum(s1),\n    .*\n  );\nendmodule\n";
        let once = cure_text(top, &table(), false).unwrap();
        let twice = cure_text(&once, &table(), false).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_cure_text_second_instance_lands_after_first_growth() {
        let top = "  adder u0 (\n    .*\n  );\n  adder u1 (\n    .a(x),\n    .b(y),\n    .*\n  );\n";
        let cured = cure_text(top, &table(), false).unwrap();

        assert_eq!(
            cured,
            "  adder u0 (\n    .a,\n    .b,\n    .cin,\n    .sum,\n    .cout\n  );\n  adder u1 (\n    .a(x),\n    .b(y),\n    .cin,\n    .sum,\n    .cout\n  );\n"
        );
    }

    #[test]
    fn test_cure_text_removes_separator_of_empty_expansion() {
        let top = "  adder u0 (\n    .a(a),\n    .b(b),\n    .cin(c),\n    .sum(s),\n    .cout(co),\n    .*\n  );\n";
        let cured = cure_text(top, &table(), false).unwrap();

        assert_eq!(
            cured,
            "  adder u0 (\n    .a(a),\n    .b(b),\n    .cin(c),\n    .sum(s),\n    .cout(co)\n  );\n"
        );
    }

    #[test]
    fn test_cure_text_propagates_ordering_refusal() {
        let top = "  adder u0 (\n    .b(y), .a(x),\n    .*\n  );\n";
        assert!(matches!(
            cure_text(top, &table(), true),
            Err(CureError::PortCountMismatch { .. })
        ));
    }

    #[test]
    fn test_engine_rewrites_flagged_files_only() {
        let storage = MockStorage::with(&[
            ("lib/adder.sv", ADDER),
            ("rtl/top.sv", "module top;\n  adder u0 (.*);\nendmodule\n"),
            ("rtl/clean.sv", "module clean;\n  adder u0 (.a(a));\nendmodule\n"),
            ("rtl/notes.txt", "  adder u0 (.*);\n"),
        ]);
        let engine = CureEngine::new(storage, options(false, false));
        let report = engine.run().unwrap();

        assert_eq!(report.files_scanned, 1);
        assert_eq!(report.instances_cured, 1);
        assert_eq!(report.files_changed, vec![PathBuf::from("rtl/top.sv")]);
        assert_eq!(
            engine.storage.get_file("rtl/top.sv").unwrap(),
            "module top;\n  adder u0 (.a,\n.b,\n.cin,\n.sum,\n.cout);\nendmodule\n"
        );
        assert_eq!(engine.storage.get_file("rtl/notes.txt").unwrap(), "  adder u0 (.*);\n");
        assert_eq!(*engine.storage.writes.borrow(), 1);
    }

    #[test]
    fn test_engine_nothing_to_cure() {
        let storage = MockStorage::with(&[("rtl/clean.sv", "module clean;\nendmodule\n")]);
        let engine = CureEngine::new(storage, options(false, false));
        let report = engine.run().unwrap();

        assert_eq!(report, CureReport::default());
        assert_eq!(*engine.storage.writes.borrow(), 0);
    }

    #[test]
    fn test_engine_dry_run_writes_nothing() {
        let storage = MockStorage::with(&[
            ("lib/adder.sv", ADDER),
            ("rtl/top.sv", "module top;\n  adder u0 (\n    .*\n  );\nendmodule\n"),
        ]);
        let engine = CureEngine::new(storage, options(true, true));
        let report = engine.run().unwrap();

        assert_eq!(report.instances_cured, 1);
        assert_eq!(*engine.storage.writes.borrow(), 0);
        assert!(engine.storage.get_file("rtl/top.sv").unwrap().contains(".*"));
    }
}
