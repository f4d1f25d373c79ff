use clap::{Parser, Subcommand};
use fittrack_core::calorie_math::{self, MacroRatios};
use fittrack_core::settings::{SAVED_MESSAGE, SAVED_TITLE};
use fittrack_core::*;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fittrack")]
#[command(about = "Fitness tracking: steps, calories, meals and goals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive tracking session (default)
    Session {
        /// Walk this many simulated accelerometer ticks before the prompt
        #[arg(long, default_value_t = 0)]
        demo_steps: usize,

        /// Behave as if camera access was denied
        #[arg(long)]
        no_camera: bool,
    },

    /// Show the dashboard for a fresh session
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Basal metabolic rate (Harris-Benedict)
    Bmr {
        /// Weight in kg
        #[arg(long)]
        weight: f64,
        /// Height in cm
        #[arg(long)]
        height: f64,
        /// Age in years
        #[arg(long)]
        age: f64,
        #[arg(long)]
        female: bool,
    },

    /// Daily calorie needs from BMR and activity level
    Needs {
        #[arg(long)]
        bmr: f64,
        /// sedentary, light, moderate, active or veryActive
        #[arg(long, default_value = "moderate")]
        activity: String,
    },

    /// Split calories into protein, carbs and fat grams
    Macros {
        #[arg(long)]
        calories: f64,
        #[arg(long, default_value_t = 30.0)]
        protein: f64,
        #[arg(long, default_value_t = 40.0)]
        carbs: f64,
        #[arg(long, default_value_t = 30.0)]
        fat: f64,
    },

    /// Predict weight change from a daily calorie balance
    Predict {
        /// Calories in minus calories out, per day
        #[arg(long, allow_hyphen_values = true)]
        balance: f64,
        #[arg(long, default_value_t = 7.0)]
        days: f64,
    },

    /// List meal suggestions
    Suggestions {
        /// balanced, lowCalorie or highProtein
        #[arg(long)]
        category: Option<String>,
    },

    /// Show the weekly progress overview
    Progress,

    /// Analyze one meal photo and print the estimate
    Analyze {
        /// Behave as if camera access was denied
        #[arg(long)]
        no_camera: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a config file seeded with these settings
    InitConfig {
        /// Weight in kg
        #[arg(long)]
        weight: String,
        /// Stride length in m
        #[arg(long)]
        stride_length: String,
        #[arg(long)]
        steps_goal: String,
        #[arg(long)]
        calorie_goal: String,
        /// Target weight in kg
        #[arg(long)]
        target_weight: String,
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    fittrack_core::logging::init_with_level("warn");

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Some(Commands::Session {
            demo_steps,
            no_camera,
        }) => cmd_session(&load_config(config_path)?, demo_steps, no_camera).await,
        Some(Commands::Status { json }) => cmd_status(&load_config(config_path)?, json),
        Some(Commands::Bmr {
            weight,
            height,
            age,
            female,
        }) => {
            let bmr = calorie_math::basal_metabolic_rate(weight, height, age, !female);
            println!("BMR: {} kcal/day", bmr);
            Ok(())
        }
        Some(Commands::Needs { bmr, activity }) => {
            let level = calorie_math::ActivityLevel::from_key_or_default(&activity);
            let needs = calorie_math::daily_calorie_needs(bmr, level);
            println!("Daily calorie needs ({}): {} kcal", level, needs);
            Ok(())
        }
        Some(Commands::Macros {
            calories,
            protein,
            carbs,
            fat,
        }) => {
            let split = calorie_math::macro_split(
                calories,
                MacroRatios {
                    protein_pct: protein,
                    carbs_pct: carbs,
                    fat_pct: fat,
                },
            );
            println!("Protein: {} g", split.protein);
            println!("Carbs:   {} g", split.carbs);
            println!("Fat:     {} g", split.fat);
            Ok(())
        }
        Some(Commands::Predict { balance, days }) => {
            let change = calorie_math::predict_weight_change(balance, days);
            println!("Predicted change over {} days: {:+.2} kg", days, change);
            Ok(())
        }
        Some(Commands::Suggestions { category }) => cmd_suggestions(category),
        Some(Commands::Progress) => {
            display_progress(&ProgressHistory::sample_week());
            Ok(())
        }
        Some(Commands::Analyze { no_camera, json }) => {
            cmd_analyze(&load_config(config_path)?, no_camera, json).await
        }
        Some(Commands::InitConfig {
            weight,
            stride_length,
            steps_goal,
            calorie_goal,
            target_weight,
            force,
        }) => {
            let form = SettingsForm {
                weight,
                stride_length,
                daily_steps_goal: steps_goal,
                daily_calorie_goal: calorie_goal,
                target_weight,
            };
            cmd_init_config(config_path, &form, force)
        }
        None => {
            // Default to an interactive session
            cmd_session(&load_config(config_path)?, 0, false).await
        }
    }
}

/// Config from `--config`, or the default location. Only commands that
/// build a store or a feed read it.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn cmd_init_config(path: Option<&Path>, form: &SettingsForm, force: bool) -> Result<()> {
    let settings = form.validate()?;
    let path = path.map_or_else(Config::default_config_path, Path::to_path_buf);

    if path.exists() && !force {
        return Err(Error::Config(format!(
            "{} already exists (use --force to replace it)",
            path.display()
        )));
    }

    let mut config = Config::default();
    config.apply_settings(&settings);
    config.save_to(&path)?;
    println!("✓ Wrote {}", path.display());
    Ok(())
}

async fn cmd_analyze(config: &Config, no_camera: bool, json: bool) -> Result<()> {
    let analyzer = MockMealAnalyzer::new(config.analysis.delay());
    let permission = if no_camera {
        CameraPermission::Denied
    } else {
        CameraPermission::Granted
    };

    let photo = MealPhoto::new("camera://capture");
    let pending = analyze_meal(&analyzer, permission, &photo).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(pending.estimate())?);
    } else {
        display_estimate(pending.estimate());
    }
    Ok(())
}

fn cmd_status(config: &Config, json: bool) -> Result<()> {
    let store = FitnessStateStore::with_state(config.initial_state()?);
    if json {
        println!("{}", serde_json::to_string_pretty(&store.summary())?);
    } else {
        display_summary(&store.summary());
    }
    Ok(())
}

fn cmd_suggestions(category: Option<String>) -> Result<()> {
    let categories: Vec<MealCategory> = match category {
        Some(key) => match MealCategory::from_key(&key) {
            Some(category) => vec![category],
            None => {
                return Err(Error::Other(format!(
                    "Unknown category: {}. Use balanced, lowCalorie or highProtein.",
                    key
                )))
            }
        },
        None => MealCategory::ALL.to_vec(),
    };

    for category in categories {
        println!("\n── {} ──", category);
        for meal in suggestions_for(category) {
            println!(
                "  {} - {} kcal  (P {} g · C {} g · F {} g)",
                meal.name, meal.calories, meal.protein, meal.carbs, meal.fat
            );
            println!("    {}", meal.description);
        }
    }

    println!();
    for (heading, tip) in suggestions::NUTRITION_TIPS {
        println!("ℹ {}: {}", heading, tip);
    }
    Ok(())
}

async fn cmd_session(config: &Config, demo_steps: usize, no_camera: bool) -> Result<()> {
    let mut store = FitnessStateStore::with_state(config.initial_state()?);
    let analyzer = MockMealAnalyzer::new(config.analysis.delay());
    let permission = if no_camera {
        CameraPermission::Denied
    } else {
        CameraPermission::Granted
    };

    if demo_steps > 0 {
        walk_simulated(&mut store, config, demo_steps).await;
        println!("✓ Simulated walk: {} steps", store.state().steps());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let mut words = line.split_whitespace();

        match words.next() {
            None => continue,
            Some("quit") | Some("exit") => break,
            Some("help") => print_session_help(),
            Some("status") => display_summary(&store.summary()),
            Some("progress") => {
                let mut history = ProgressHistory::sample_week();
                history.record_day("Today", store.state());
                history.record_weight("Today", store.state().weight());
                display_progress(&history);
            }
            Some("reset") => {
                store.dispatch(Command::ResetSteps);
                println!("✓ Steps reset");
            }
            Some("steps") => match words.next().and_then(|n| n.parse::<i64>().ok()) {
                Some(delta) => {
                    store.dispatch(Command::IncrementSteps(delta));
                    println!(
                        "✓ Steps: {} ({} kcal burned)",
                        store.state().steps(),
                        store.state().calories_burned()
                    );
                }
                None => println!("Usage: steps <count>"),
            },
            Some("meal") => {
                let calories = words.next().and_then(|c| c.parse::<u32>().ok());
                let name = words.collect::<Vec<_>>().join(" ");
                match calories {
                    Some(calories) if !name.is_empty() => {
                        store.dispatch(Command::AddMeal {
                            name: name.clone(),
                            calories,
                        });
                        println!("✓ Logged {} ({} kcal)", name, calories);
                    }
                    _ => println!("Usage: meal <calories> <name>"),
                }
            }
            Some("settings") => {
                let mut field = || words.next().unwrap_or_default().to_string();
                let form = SettingsForm {
                    weight: field(),
                    stride_length: field(),
                    daily_steps_goal: field(),
                    daily_calorie_goal: field(),
                    target_weight: field(),
                };
                match form.validate() {
                    Ok(settings) => {
                        store.dispatch(Command::ApplySettings(settings));
                        println!("✓ {}: {}", SAVED_TITLE, SAVED_MESSAGE);
                    }
                    Err(e) => println!("✗ {}: {}", e.title(), e.message()),
                }
            }
            Some("analyze") => {
                let photo = MealPhoto::new("camera://capture");
                println!("Analyzing meal...");
                match analyze_meal(&analyzer, permission, &photo).await {
                    Ok(pending) => {
                        display_estimate(pending.estimate());
                        print!("Add to tracker? [Y/n] ");
                        io::stdout().flush()?;
                        let answer = lines.next().transpose()?.unwrap_or_default();
                        if answer.trim().eq_ignore_ascii_case("n") {
                            println!("Discarded");
                        } else {
                            store.dispatch(pending.confirm());
                            println!("✓ Meal added");
                        }
                    }
                    Err(AnalysisError::PermissionDenied) => {
                        println!("No access to camera");
                    }
                    Err(e) => println!("✗ {}", e),
                }
            }
            Some(other) => println!("Unknown command: {} (try 'help')", other),
        }
    }

    Ok(())
}

/// Drive the step feed from the simulated accelerometer until it runs out
async fn walk_simulated(store: &mut FitnessStateStore, config: &Config, ticks: usize) {
    let sensor = MotionSensor::new(config.sensor.update_interval());
    let mut feed = StepFeed::start(&sensor, config.sensor.detector());
    let driver =
        SimulatedAccelerometer::spawn(sensor, SimulatedAccelerometer::walking_pattern(ticks));

    while let Some(command) = feed.next_command().await {
        store.dispatch(command);
    }

    if let Err(e) = driver.await {
        tracing::warn!("Simulated accelerometer stopped early: {}", e);
    }
}

fn print_session_help() {
    println!("Commands:");
    println!("  steps <count>            add steps");
    println!("  reset                    reset steps and burned calories");
    println!("  meal <calories> <name>   log a meal");
    println!("  analyze                  analyze a meal photo and log it");
    println!("  settings <weight> <stride> <steps goal> <calorie goal> <target weight>");
    println!("  status                   show the dashboard");
    println!("  progress                 show the week with today's numbers");
    println!("  quit                     leave the session");
}

fn display_summary(summary: &DashboardSummary) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  HEALTH DASHBOARD");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  Steps: {} / {} ({}%)",
        summary.steps, summary.daily_steps_goal, summary.steps_progress_percent
    );
    println!("  Calories Burned: {}", summary.calories_burned);
    println!("  Calories Consumed: {}", summary.calories_consumed);
    println!(
        "  Calories Remaining: {} (goal {})",
        summary.calories_remaining, summary.daily_calorie_goal
    );
    println!("  Meals Logged: {}", summary.meals_logged);
    println!();
    println!(
        "  Weight: {} kg (target {} kg)",
        summary.weight, summary.target_weight
    );
    match summary.weight_goal {
        WeightGoalStatus::ToLose(kg) => println!("  → {:.1} kg to lose", kg),
        WeightGoalStatus::ToGain(kg) => println!("  → {:.1} kg to gain", kg),
        WeightGoalStatus::Achieved => println!("  → Goal achieved"),
    }
    println!();
}

fn display_estimate(estimate: &NutritionEstimate) {
    println!();
    println!("  {}", estimate.name);
    println!("  Calories: {}", estimate.calories);
    println!(
        "  Protein {} g · Carbs {} g · Fat {} g",
        estimate.protein, estimate.carbs, estimate.fat
    );
    println!();
}

fn display_progress(history: &ProgressHistory) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  PROGRESS OVERVIEW");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Day   Steps   In     Out    Balance");
    for day in &history.days {
        println!(
            "  {:<5} {:>6}  {:>5}  {:>5}  {:>+7}",
            day.label,
            day.steps,
            day.calories_in,
            day.calories_out,
            day.balance()
        );
    }
    println!();
    if let Some(avg) = history.average_steps() {
        println!("  Average steps: {}", avg);
    }
    if let Some(best) = history.best_day() {
        println!("  Best day: {} ({} steps)", best.label, best.steps);
    }
    if let Some(change) = history.total_weight_change() {
        println!("  Weight change: {:+.1} kg", change);
    }
    if let Some(projected) = history.projected_weekly_change() {
        println!("  Projected next week: {:+.2} kg", projected);
    }
    println!();
}
