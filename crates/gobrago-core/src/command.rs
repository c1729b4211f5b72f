//! Expansion of configuration into a Gobra command line.
//!
//! The order in which flags are emitted is part of the output format and is
//! fixed by [`expand`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::install::InstallConfig;
use crate::job::JobConfig;
use crate::{Error, Result};

/// Program used to launch the Gobra jar.
pub const JAVA: &str = "java";

/// A program together with its ordered arguments.
///
/// `Display` joins all tokens with single spaces. Tokens are not quoted, so a
/// token containing whitespace cannot be recovered from the joined string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Program followed by its arguments.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Expand resolved configs into the Gobra invocation.
///
/// Inputs must already carry their defaults and resolved paths; nothing is
/// filled in here. Fails only when the jar path is empty.
pub fn expand(install: &InstallConfig, job: &JobConfig) -> Result<Invocation> {
    let mut args = Vec::new();

    // installation
    args.extend(install.jvm_options.iter().cloned());
    if install.jar_path.is_empty() {
        return Err(Error::MissingJarPath);
    }
    push_pair(&mut args, "-jar", &install.jar_path);
    if !install.z3_path.is_empty() {
        push_pair(&mut args, "--z3Exe", &install.z3_path);
    }

    // job
    if job.assume_injectivity_inhale {
        push_flag(&mut args, "--assumeInjectivityOnInhale");
    } else {
        push_flag(&mut args, "--noassumeInjectivityOnInhale");
    }
    if let Some(backend) = &job.backend {
        push_pair(&mut args, "--backend", backend.to_string());
    }
    if job.check_consistency {
        push_flag(&mut args, "--checkConsistency");
    }
    if job.check_overflow {
        push_flag(&mut args, "--overflow");
    }
    if job.conditionalize_permissions {
        push_flag(&mut args, "--conditionalizePermissions");
    }
    if job.header_only {
        push_flag(&mut args, "--onlyFilesWithHeader");
    }
    push_list(&mut args, "-I", &job.include_paths);
    push_list(&mut args, "-i", &job.input_file_paths);
    let mce_mode = job
        .mce_mode
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_default();
    args.push(format!("--mceMode={}", mce_mode));
    if !job.module.is_empty() {
        push_pair(&mut args, "-m", &job.module);
    }
    if let Some(more_joins) = &job.more_joins {
        push_pair(&mut args, "--moreJoins", more_joins.to_string());
    }
    if !job.package_path.is_empty() {
        push_pair(&mut args, "-p", &job.package_path);
    }
    if job.parallelize_branches {
        push_flag(&mut args, "--parallelizeBranches");
    }
    if job.print_vpr {
        push_flag(&mut args, "--printVpr");
    }
    if !job.project_root.is_empty() {
        push_pair(&mut args, "--projectRoot", &job.project_root);
    }
    if job.recursive {
        push_flag(&mut args, "-r");
    }
    if job.require_triggers {
        push_flag(&mut args, "--requireTriggers");
    }
    args.extend(job.other_flags.iter().cloned());

    debug!(args = args.len(), "Expanded Gobra invocation");
    Ok(Invocation::new(JAVA, args))
}

/// Expand and join into the single-line command string.
pub fn expand_to_string(install: &InstallConfig, job: &JobConfig) -> Result<String> {
    expand(install, job).map(|invocation| invocation.to_string())
}

fn push_flag(args: &mut Vec<String>, flag: &str) {
    args.push(flag.to_string());
}

fn push_pair(args: &mut Vec<String>, flag: &str, value: impl Into<String>) {
    args.push(flag.to_string());
    args.push(value.into());
}

fn push_list(args: &mut Vec<String>, flag: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    args.push(flag.to_string());
    args.extend(values.iter().cloned());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::{MceMode, MoreJoins, ViperBackend};

    /// A job with every option off or empty.
    fn bare_job() -> JobConfig {
        JobConfig {
            assume_injectivity_inhale: false,
            backend: None,
            check_consistency: false,
            check_overflow: false,
            conditionalize_permissions: false,
            header_only: false,
            include_paths: vec![],
            input_file_paths: vec![],
            mce_mode: None,
            module: String::new(),
            more_joins: None,
            package_path: String::new(),
            parallelize_branches: false,
            print_vpr: false,
            project_root: String::new(),
            recursive: false,
            require_triggers: false,
            other_flags: vec![],
        }
    }

    fn install(jar: &str) -> InstallConfig {
        InstallConfig {
            jar_path: jar.to_string(),
            ..InstallConfig::default()
        }
    }

    fn count(cmd: &str, token: &str) -> usize {
        cmd.split(' ').filter(|t| *t == token).count()
    }

    #[test]
    fn test_simple_expansion() {
        let install = InstallConfig {
            jar_path: "gobra.jar".to_string(),
            jvm_options: vec!["-Xss128m".to_string()],
            z3_path: String::new(),
        };
        let job = JobConfig {
            package_path: "/test/".to_string(),
            backend: Some(ViperBackend::Silicon),
            ..bare_job()
        };

        let cmd = expand_to_string(&install, &job).unwrap();
        assert_eq!(
            cmd,
            "java -Xss128m -jar gobra.jar --noassumeInjectivityOnInhale --backend SILICON --mceMode= -p /test/"
        );
    }

    #[test]
    fn test_every_option_in_order() {
        let install = InstallConfig {
            jar_path: "/gobra.jar".to_string(),
            jvm_options: vec!["-Xss1g".to_string(), "-Xmx4g".to_string()],
            z3_path: "/usr/bin/z3".to_string(),
        };
        let job = JobConfig {
            assume_injectivity_inhale: true,
            backend: Some(ViperBackend::Carbon),
            check_consistency: true,
            check_overflow: true,
            conditionalize_permissions: true,
            header_only: true,
            include_paths: vec!["/inc/a".to_string(), "/inc/b".to_string()],
            input_file_paths: vec!["/src/a.go".to_string(), "/src/b.gobra".to_string()],
            mce_mode: Some(MceMode::Off),
            module: "example.com/mod".to_string(),
            more_joins: Some(MoreJoins::All),
            package_path: "/src".to_string(),
            parallelize_branches: true,
            print_vpr: true,
            project_root: "/proj".to_string(),
            recursive: true,
            require_triggers: true,
            other_flags: vec!["--disableNL".to_string(), "--chop".to_string(), "3".to_string()],
        };

        let cmd = expand_to_string(&install, &job).unwrap();
        assert_eq!(
            cmd,
            "java -Xss1g -Xmx4g -jar /gobra.jar --z3Exe /usr/bin/z3 \
             --assumeInjectivityOnInhale --backend CARBON --checkConsistency --overflow \
             --conditionalizePermissions --onlyFilesWithHeader -I /inc/a /inc/b \
             -i /src/a.go /src/b.gobra --mceMode=off -m example.com/mod --moreJoins all \
             -p /src --parallelizeBranches --printVpr --projectRoot /proj -r \
             --requireTriggers --disableNL --chop 3"
        );
    }

    #[test]
    fn test_default_job_expansion() {
        let cmd = expand_to_string(&install("/gobra.jar"), &JobConfig::default()).unwrap();
        assert_eq!(
            cmd,
            "java -jar /gobra.jar --assumeInjectivityOnInhale --backend SILICON \
             --checkConsistency --onlyFilesWithHeader --mceMode=od --requireTriggers"
        );
    }

    #[test]
    fn test_missing_jar_path_fails() {
        let install = InstallConfig {
            jar_path: String::new(),
            jvm_options: vec!["-Xss1g".to_string()],
            z3_path: "/usr/bin/z3".to_string(),
        };
        for job in [bare_job(), JobConfig::default()] {
            let result = expand(&install, &job);
            assert!(matches!(result, Err(Error::MissingJarPath)));
        }
    }

    #[test]
    fn test_jar_path_is_the_only_requirement() {
        assert!(expand(&install("x.jar"), &bare_job()).is_ok());
        assert!(expand(&install("x.jar"), &JobConfig::default()).is_ok());
    }

    #[test]
    fn test_backend_presence() {
        let unset = expand_to_string(&install("g.jar"), &bare_job()).unwrap();
        assert_eq!(count(&unset, "--backend"), 0);

        for backend in [
            ViperBackend::Silicon,
            ViperBackend::Carbon,
            ViperBackend::SiliconViperServer,
            ViperBackend::CarbonViperServer,
            ViperBackend::Other("LAZY_SILICON".to_string()),
        ] {
            let job = JobConfig {
                backend: Some(backend.clone()),
                ..bare_job()
            };
            let cmd = expand_to_string(&install("g.jar"), &job).unwrap();
            assert_eq!(count(&cmd, "--backend"), 1);
            assert!(cmd.contains(&format!("--backend {}", backend)));
        }
    }

    #[test]
    fn test_mce_mode_always_present_once() {
        for mce_mode in [
            None,
            Some(MceMode::On),
            Some(MceMode::Od),
            Some(MceMode::Off),
            Some(MceMode::Other("full".to_string())),
        ] {
            let job = JobConfig {
                mce_mode,
                ..bare_job()
            };
            let cmd = expand_to_string(&install("g.jar"), &job).unwrap();
            let occurrences = cmd
                .split(' ')
                .filter(|t| t.starts_with("--mceMode="))
                .count();
            assert_eq!(occurrences, 1, "{}", cmd);
        }
    }

    #[test]
    fn test_injectivity_pair_is_exclusive() {
        for assume in [true, false] {
            let job = JobConfig {
                assume_injectivity_inhale: assume,
                ..bare_job()
            };
            let cmd = expand_to_string(&install("g.jar"), &job).unwrap();
            let positive = count(&cmd, "--assumeInjectivityOnInhale");
            let negative = count(&cmd, "--noassumeInjectivityOnInhale");
            assert_eq!(positive + negative, 1);
            assert_eq!(positive == 1, assume);
        }
    }

    #[test]
    fn test_empty_lists_emit_no_flag() {
        let cmd = expand_to_string(&install("g.jar"), &bare_job()).unwrap();
        assert_eq!(count(&cmd, "-I"), 0);
        assert_eq!(count(&cmd, "-i"), 0);
    }

    #[test]
    fn test_other_flags_are_verbatim_and_last() {
        let job = JobConfig {
            require_triggers: true,
            other_flags: vec!["-r".to_string(), "--printVpr".to_string()],
            ..bare_job()
        };
        let cmd = expand_to_string(&install("g.jar"), &job).unwrap();
        assert!(cmd.ends_with("--requireTriggers -r --printVpr"));
    }

    #[test]
    fn test_unrecognized_tags_pass_through() {
        let job = JobConfig {
            backend: Some(ViperBackend::Other("LAZY_SILICON".to_string())),
            mce_mode: Some(MceMode::Other("full".to_string())),
            more_joins: Some(MoreJoins::Other("none".to_string())),
            ..bare_job()
        };
        let cmd = expand_to_string(&install("g.jar"), &job).unwrap();
        assert_eq!(
            cmd,
            "java -jar g.jar --noassumeInjectivityOnInhale --backend LAZY_SILICON \
             --mceMode=full --moreJoins none"
        );
    }

    #[test]
    fn test_empty_list_entry_is_an_empty_token() {
        let job = JobConfig {
            include_paths: vec![String::new(), "/x".to_string()],
            ..bare_job()
        };
        let invocation = expand(&install("g.jar"), &job).unwrap();
        let include_flag = invocation.args().iter().position(|a| a == "-I").unwrap();
        assert_eq!(invocation.args()[include_flag + 1], "");
        assert!(invocation.to_string().contains("-I  /x"));
    }

    #[test]
    fn test_expansion_is_pure() {
        let install = InstallConfig {
            jar_path: "g.jar".to_string(),
            jvm_options: vec!["-Xss1g".to_string()],
            z3_path: "z3".to_string(),
        };
        let job = JobConfig {
            include_paths: vec!["/a".to_string(), "/b".to_string()],
            ..JobConfig::default()
        };
        let first = expand_to_string(&install, &job).unwrap();
        let second = expand_to_string(&install, &job).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_whitespace_is_not_quoted() {
        let job = JobConfig {
            package_path: "/my pkg".to_string(),
            ..bare_job()
        };
        let invocation = expand(&install("g.jar"), &job).unwrap();
        assert!(invocation.to_string().ends_with("-p /my pkg"));
        assert_eq!(invocation.args().last().map(String::as_str), Some("/my pkg"));
    }

    #[test]
    fn test_tokens_start_with_program() {
        let invocation = expand(&install("g.jar"), &bare_job()).unwrap();
        assert_eq!(invocation.program(), JAVA);
        let tokens: Vec<&str> = invocation.tokens().collect();
        assert_eq!(tokens[..3], ["java", "-jar", "g.jar"]);
        assert_eq!(tokens.join(" "), invocation.to_string());
    }
}
