use legacy_ledger::backend::db::{ConnectionCache, SqliteConnector};
use legacy_ledger::backend::db::sqlite::MIGRATOR;
use legacy_ledger::shared::AppConfig;
use sqlx::Row;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let config = AppConfig::from_env()?;

    println!("🔍 DEBUGGING DATABASE CONNECTION");
    println!("================================");
    println!("DATABASE_URL: {}", config.database_url);
    println!("Connect timeout: {:?}", config.connect_timeout);

    let connector = SqliteConnector::from_config(&config)?;
    let cache = ConnectionCache::new(connector, config.connect_timeout);

    println!("\n🔗 Establishing connection (pool + migrations)...");
    let conn = match cache.get().await {
        Ok(conn) => {
            println!("✅ Connected (generation {})", conn.generation());
            conn
        }
        Err(e) => {
            println!("❌ Connection failed: {}", e);
            return Ok(());
        }
    };
    let pool = conn.pool();

    println!("\n📋 Embedded migrations:");
    for migration in MIGRATOR.iter() {
        println!("  - {} {}", migration.version, migration.description);
    }

    println!("\n🧪 Checking accounts table...");
    match sqlx::query("SELECT COUNT(*) AS n FROM accounts").fetch_one(pool).await {
        Ok(row) => {
            let n: i64 = row.try_get("n")?;
            println!("✅ accounts table present, {} row(s)", n);
        }
        Err(e) => println!("❌ Query failed: {}", e),
    }

    match sqlx::query("SELECT role, COUNT(*) AS n FROM accounts GROUP BY role")
        .fetch_all(pool)
        .await
    {
        Ok(rows) => {
            for row in rows {
                let role: String = row.try_get("role")?;
                let n: i64 = row.try_get("n")?;
                println!("  {}: {}", role, n);
            }
        }
        Err(e) => println!("❌ Role breakdown failed: {}", e),
    }

    pool.close().await;
    println!("\n🎉 Done");
    Ok(())
}
