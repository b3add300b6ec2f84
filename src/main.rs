use std::process::ExitCode;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use human_panic::setup_panic;
use serde::Serialize;
use tracing::{debug, info};

use academic_records::config::AppConfig;
use academic_records::errors::{RecordsError, Result};
use academic_records::services::RecordsServices;
use academic_records::storage::{Storage, create_storage};

/// 选课同步与成绩统计命令行工具
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 初始化数据库并执行迁移
    Migrate,
    /// 按学号查询学生成绩表现
    StudentPerformance {
        #[arg(long)]
        roll_no: String,
    },
    /// 课程成绩报表
    SubjectReport,
    /// 教师教学报表
    TeacherReport,
    /// 成绩排行榜
    TopStudents {
        /// 返回人数，缺省使用配置 analytics.default_top_limit
        #[arg(long)]
        limit: Option<usize>,
        /// 只统计该学年的学生
        #[arg(long)]
        year: Option<i32>,
    },
    /// 考试成绩录入进度
    ExamCompletion {
        #[arg(long)]
        exam_id: i64,
    },
    /// 重新同步学生选课
    Reconcile {
        #[arg(long)]
        roll_no: String,
        /// 额外指定的课程，可重复
        #[arg(long = "subject-id")]
        subject_ids: Vec<i64>,
    },
}

/// 调用方输入被拒绝时返回 2，内部故障返回 1
fn exit_status(err: &RecordsError) -> u8 {
    if err.is_client_error() { 2 } else { 1 }
}

fn report_error(err: &RecordsError) {
    if err.is_client_error() {
        eprintln!("{}", err.format_simple());
        return;
    }
    #[cfg(debug_assertions)]
    eprintln!("{}", err.format_colored());
    #[cfg(not(debug_assertions))]
    eprintln!("{}", err.format_simple());
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(command: Commands, storage: std::sync::Arc<dyn Storage>) -> Result<()> {
    let config = AppConfig::get();
    let services = RecordsServices::new(storage.clone());

    match command {
        Commands::Migrate => {
            // 迁移已在建立存储连接时执行
            info!("Database migrations applied: {}", config.database.url);
            print_json(&serde_json::json!({
                "migrated": true,
                "database": config.database.url,
            }))
        }
        Commands::StudentPerformance { roll_no } => {
            print_json(&services.analytics.student_performance(&roll_no).await?)
        }
        Commands::SubjectReport => {
            print_json(&services.analytics.subject_performance_report().await?)
        }
        Commands::TeacherReport => {
            print_json(&services.analytics.teacher_performance_report().await?)
        }
        Commands::TopStudents { limit, year } => {
            let limit = limit.unwrap_or(config.analytics.default_top_limit);
            print_json(&services.analytics.top_students(limit, year).await?)
        }
        Commands::ExamCompletion { exam_id } => {
            print_json(&services.analytics.exam_completion(exam_id).await?)
        }
        Commands::Reconcile {
            roll_no,
            subject_ids,
        } => {
            let student = storage.get_student_by_roll_no(&roll_no).await?.ok_or_else(|| {
                RecordsError::not_found(format!("Student not found with rollNo {roll_no}"))
            })?;
            print_json(
                &services
                    .roster
                    .reconcile_enrollments(&student, &subject_ids)
                    .await?,
            )
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    let app_start_time = chrono::Utc::now();

    // 初始化配置
    setup_panic!();
    if let Err(e) = AppConfig::init() {
        eprintln!("Failed to initialize configuration: {e}");
        return ExitCode::FAILURE;
    }
    let config = AppConfig::get();

    // 初始化日志，标准输出留给报表
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    let cli = Cli::parse();

    debug!(
        "{} v{} ({})",
        config.app.system_name,
        env!("CARGO_PKG_VERSION"),
        config.app.environment
    );

    let result = match create_storage().await {
        Ok(storage) => run(cli.command, storage).await,
        Err(e) => Err(e),
    };

    debug!(
        "Command completed in {} ms",
        chrono::Utc::now()
            .signed_duration_since(app_start_time)
            .num_milliseconds()
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::from(exit_status(&e))
        }
    }
}
