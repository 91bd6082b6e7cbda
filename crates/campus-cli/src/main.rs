use campus_cli::admin::{NewAdmin, create_admin};
use campus_cli::seeder::{self, SeedConfig};
use campus_config::DatabaseConfig;
use campus_db::{init_db_pool, run_migrations};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "campus-cli")]
#[command(about = "Campus CLI - administrative tools for the Campus API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        #[arg(short = 'u', long)]
        username: Option<String>,

        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Full name
        #[arg(short = 'n', long)]
        fio: Option<String>,

        /// Password (prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the database with fake directions, courses, teachers, students and schedules
    Seed {
        #[arg(short = 'd', long, default_value = "4")]
        directions: usize,

        #[arg(long, default_value = "8")]
        semesters: usize,

        /// Courses per semester
        #[arg(long, default_value = "5")]
        courses: usize,

        #[arg(long, default_value = "10")]
        teachers: usize,

        /// Students per direction
        #[arg(long, default_value = "30")]
        students: usize,

        /// Weekly sessions per course
        #[arg(long, default_value = "4")]
        sessions: usize,

        #[arg(long, default_value = "5")]
        events: usize,

        /// Password shared by all seeded accounts
        #[arg(long, default_value = "password123")]
        password: String,
    },
    /// Remove seeded data (admins are kept)
    ClearSeed,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let cli = Cli::parse();

    let db_config = DatabaseConfig::from_env().ok_or("DATABASE_URL must be set")?;
    let pool = init_db_pool(&db_config).await?;
    run_migrations(&pool).await?;

    let result = match cli.command {
        Commands::CreateAdmin {
            username,
            email,
            fio,
            password,
        } => handle_create_admin(&pool, username, email, fio, password).await,
        Commands::Seed {
            directions,
            semesters,
            courses,
            teachers,
            students,
            sessions,
            events,
            password,
        } => {
            let config = SeedConfig {
                directions,
                semesters_per_direction: semesters,
                courses_per_semester: courses,
                teachers,
                students_per_direction: students,
                sessions_per_course: sessions,
                events,
                password,
            };
            seeder::seed_all(&pool, config).await
        }
        Commands::ClearSeed => seeder::clear_all(&pool).await,
    };

    if let Err(e) = result {
        eprintln!("\n❌ {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn handle_create_admin(
    pool: &sqlx::PgPool,
    username: Option<String>,
    email: Option<String>,
    fio: Option<String>,
    password: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let username = match username {
        Some(username) => username,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let fio = match fio {
        Some(fio) => fio,
        None => Input::new().with_prompt("Full name").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let id = create_admin(
        pool,
        NewAdmin {
            username: &username,
            email: &email,
            fio: &fio,
            password: &password,
        },
    )
    .await?;

    println!("\n✅ Admin created successfully!");
    println!("   ID: {}", id);
    println!("   Username: {}", username);
    println!("   Email: {}", email);

    Ok(())
}
