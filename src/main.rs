#[actix_web::main]
async fn main() -> std::io::Result<()> {
    legaldraft::run().await
}
