//! Resume matcher: resume and job description skill matching tool

use clap::Parser;
use colored::Colorize;
use log::{error, info};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction};
use resume_matcher::config::Config;
use resume_matcher::error::{MatcherError, Result};
use resume_matcher::input::manager::InputManager;
use resume_matcher::output::formatter::{resolve_save_path, save_report_to_file, ReportGenerator};
use resume_matcher::processing::analyzer::{AnalysisEngine, AnalysisRequest};
use resume_matcher::processing::dictionary::{SkillDictionary, TitleDictionary};
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level)
    ).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            output,
            save,
            detailed,
        } => {
            cli::validate_file_extension(&resume, cli::RESUME_EXTENSIONS)
                .map_err(|e| MatcherError::UnsupportedFormat(format!("Resume file: {}", e)))?;
            if let Some(job) = &job {
                cli::validate_file_extension(job, cli::JOB_EXTENSIONS)
                    .map_err(|e| MatcherError::UnsupportedFormat(format!("Job description file: {}", e)))?;
            }

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(MatcherError::InvalidInput)?,
                None => config.output.format,
            };

            let mut input_manager = InputManager::from_config(&config.input);
            let resume_text = input_manager.extract_text(&resume).await?;
            let jd_text = input_manager
                .job_description(job.as_deref(), job_text.as_deref())
                .await?;

            let job_source = match &job {
                Some(path) => path.display().to_string(),
                None => "inline text".to_string(),
            };
            let request = AnalysisRequest::new(resume_text, jd_text)
                .with_sources(resume.display().to_string(), job_source);

            let engine = AnalysisEngine::new(&config)?;
            let report = engine.analyze_request(&request)?;
            info!("Match score: {}%", report.match_score);

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                detailed || config.output.detailed,
                true,
                true,
                true,
            );
            let rendered = generator.generate_report(&report, output_format)?;

            match save {
                Some(target) => {
                    let path = resolve_save_path(&target, output_format, &report.metadata.resume_source);
                    save_report_to_file(&rendered, &path)?;
                    println!("✅ Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Dictionary { skills, titles } => {
            let skill_dictionary = SkillDictionary::builtin()
                .with_custom_skills(&config.dictionary.custom_skills);
            let show_all = !skills && !titles;

            if skills || show_all {
                println!("{} ({} skills)\n", "📚 Skills".bold(), skill_dictionary.skill_count());
                for category in skill_dictionary.categories() {
                    println!("{}:", category.name.cyan().bold());
                    for entry in &category.skills {
                        println!("  • {} [{}]", entry.canonical, entry.variants.join(", "));
                    }
                    println!();
                }
            }

            if titles || show_all {
                let title_dictionary = TitleDictionary::builtin();
                println!("{} ({} titles)\n", "💼 Job Titles".bold(), title_dictionary.title_count());
                for entry in title_dictionary.entries() {
                    println!("  • {} [{}]", entry.canonical, entry.variants.join(", "));
                }
            }

            let engine = AnalysisEngine::new(&config)?;
            let stats = engine.get_stats();
            println!(
                "\n🔧 Matcher: {} skills ({} surface forms), {} titles, heatmap top {} keywords",
                stats.skill_count, stats.skill_patterns, stats.title_count, stats.heatmap_top_keywords
            );
        }

        Commands::Config { action } => {
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration ({})\n", config_path.display());
                    let rendered = toml::to_string_pretty(&config)
                        .map_err(|e| MatcherError::Configuration(format!("Failed to render config: {}", e)))?;
                    println!("{}", rendered);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default().save_to(&config_path)?;
                    println!("✅ Configuration reset successfully!");
                }

                Some(ConfigAction::Path) => {
                    println!("{}", config_path.display());
                }
            }
        }
    }

    Ok(())
}
