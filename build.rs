fn main() {
    // Migrations are embedded with `sqlx::migrate!()`
    println!("cargo:rerun-if-changed=migrations");
}
