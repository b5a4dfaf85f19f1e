use crate::adapter::{Adapter, AdapterBox};
use crate::configuration::{PackerConfiguration, load_configuration};
use crate::help::{generate_configuration_message, print_help};
use crate::packer::pack_archive;
use crate::version::get_version;
use addon_packer_base::logging::info;
use addon_packer_base::result::{HelpError, MietteReportError, PackerError, PackerResult};
use miette::{GraphicalReportHandler, GraphicalTheme};
use std::fmt::Write;
use std::rc::Rc;

pub struct AddonPackerRunner {
    adapter: AdapterBox,
    report_handler: GraphicalReportHandler,
}

impl AddonPackerRunner {
    pub fn new(adapter: impl Adapter) -> Self {
        let want_color = want_color(adapter.env());
        let theme = if want_color {
            GraphicalTheme::unicode()
        } else {
            GraphicalTheme::unicode_nocolor()
        };
        let report_handler = GraphicalReportHandler::new_themed(theme);
        Self {
            adapter: Rc::new(adapter),
            report_handler,
        }
    }

    pub fn run(&self) {
        info!("Running addon-packer ({})", get_version());
        match self.run_inner() {
            Ok(()) => {}
            Err(err) => {
                if let Err(print_err) = self.print_error(err) {
                    self.adapter
                        .print(&format!("ERROR: Failed to print error: {print_err}\n"));
                }
                self.adapter.exit(1);
            }
        }
    }

    pub fn run_inner(&self) -> PackerResult<()> {
        let args = self.adapter.args();
        let Some(first_arg) = args.get(1) else {
            return self.pack();
        };
        match first_arg.as_str() {
            "--help" => {
                print_help(self.adapter.as_ref());
            }
            "--version" => {
                self.print_version();
            }
            "--list" => {
                self.list()?;
            }
            other => {
                self.adapter.print(&format!(
                    "ERROR: Unknown argument: '{other}'\n\nTry --help for more information about supported arguments"
                ));
                self.adapter.exit(1);
            }
        }
        Ok(())
    }

    fn print_error(&self, err: PackerError) -> PackerResult<()> {
        let mut message = format!("ERROR running addon-packer ({}): {err}\n", get_version());
        let mut help_text = String::new();
        if err.source().is_some() {
            message.push_str("  Chain of causes:\n");
            err.chain().skip(1).enumerate().for_each(|(index, err)| {
                message.push_str(&format!("   {index}: {err}\n"));
            });
            message.push('\n');
            for err in err.chain() {
                if let Some(err) = err.downcast_ref::<MietteReportError>() {
                    self.report_handler
                        .render_report(&mut message, &**err.report())?;
                } else if let Some(err) = err.downcast_ref::<HelpError>() {
                    writeln!(help_text, "Help: {}", err.help_message)?;
                }
            }
        }
        // omit backtrace in tests to prevent noise in test output
        #[cfg(not(test))]
        {
            let backtrace = err.backtrace();
            if let std::backtrace::BacktraceStatus::Captured = backtrace.status() {
                message.push_str("\n  Backtrace:\n");
                message.push_str(&backtrace.to_string());
            }
        }
        // put help text last
        message.push_str(&help_text);
        self.adapter.print(&message);
        Ok(())
    }

    fn pack(&self) -> PackerResult<()> {
        let config = self.load_config()?;
        let report = pack_archive(self.adapter.as_ref(), &config)?;
        info!(
            "Packed {} entries, {} inputs missing, {} skipped",
            report.entries.len(),
            report.missing.len(),
            report.skipped.len()
        );
        Ok(())
    }

    fn list(&self) -> PackerResult<()> {
        let config = self.load_config()?;
        self.adapter.print(&generate_configuration_message(&config));
        Ok(())
    }

    fn print_version(&self) {
        self.adapter.print(&format!("{}\n", get_version()))
    }

    fn load_config(&self) -> PackerResult<PackerConfiguration> {
        load_configuration(self.adapter.as_ref())
    }
}

fn want_color(env: Vec<(String, String)>) -> bool {
    let mut want_color = true;
    for (key, value) in env {
        if key == "NO_COLOR" && !value.is_empty() {
            want_color = false;
        }
    }
    want_color
}
