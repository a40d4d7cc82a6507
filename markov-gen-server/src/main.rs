mod config;

use std::path::Path;
use std::sync::RwLock;

use actix_cors::Cors;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use config::Config;
use markov_gen_core::io::list_files;
use markov_gen_core::model::MarkovChain;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	length: Option<usize>,
	seed: Option<u64> // reproducible output when set
}

#[derive(Deserialize)]
struct SourceQuery {
	names: Option<String>
}

struct SharedData {
	chain: MarkovChain,
	config: Config
}

type Shared = web::Data<RwLock<SharedData>>;

/// Parses a comma separated list of sources.
///
/// Each entry is `name` or `name:repeat`, where `repeat` is the number of
/// times the source is ingested (1 by default, must be >= 1).
fn parse_sources(names: &str) -> Result<Vec<(String, usize)>, String> {
	let mut sources = Vec::new();
	for entry in names.split(',').map(str::trim).filter(|s| !s.is_empty()) {
		let (name, repeat) = match entry.split_once(':') {
			Some((name, repeat)) => match repeat.trim().parse::<usize>() {
				Ok(n) if n >= 1 => (name.trim(), n),
				_ => return Err(format!("Invalid repeat count in '{}'", entry)),
			},
			None => (entry, 1),
		};
		if name.is_empty() {
			return Err(format!("Missing source name in '{}'", entry));
		}
		if name.contains(['/', '\\']) || name.contains("..") {
			return Err(format!("Invalid source name '{}'", name));
		}
		sources.push((name.to_owned(), repeat));
	}
	if sources.is_empty() {
		return Err("Missing or empty source name".to_owned());
	}
	Ok(sources)
}

/// Checks that every source is a `.txt` file listed in the data folder.
fn check_available(available: &[String], sources: &[(String, usize)]) -> Result<(), String> {
	for (name, _) in sources {
		let file = format!("{}.txt", name);
		if !available.contains(&file) {
			return Err(format!("Unknown source '{}'", name));
		}
	}
	Ok(())
}

/// Builds a new chain from sources of the data folder.
fn build_chain(data_path: &Path, order: usize, sources: &[(String, usize)]) -> Result<MarkovChain, Box<dyn std::error::Error>> {
	let mut chain = MarkovChain::new(order)?;
	for (name, repeat) in sources {
		let source_path = data_path.join(format!("{}.txt", name));
		for _ in 0..*repeat {
			chain.ingest_file(&source_path)?;
		}
	}
	Ok(chain)
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates text from the loaded chain. Returns the text as the response
/// body, paragraphs separated by a blank line.
#[get("/v1/generate")]
async fn get_generated(data: Shared, query: web::Query<GenerateParams>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};

	let length = query.length.unwrap_or(shared_data.config.default_length);
	if length > shared_data.config.max_length {
		return HttpResponse::BadRequest()
			.body(format!("length must be <= {}", shared_data.config.max_length));
	}
	let result = match query.seed {
		Some(seed) => shared_data.chain.generate(length, &mut StdRng::seed_from_u64(seed)),
		None => shared_data.chain.generate(length, &mut rand::rng()),
	};

	match result {
		Ok(text) => HttpResponse::Ok().body(text),
		Err(e) => HttpResponse::InternalServerError().body(e),
	}
}

#[get("/v1/sources")]
async fn get_sources(data: Shared) -> impl Responder {
	let data_path = match data.read() {
		Ok(m) => m.config.data_path.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};
	match list_files(&data_path, "txt") {
		Ok(files) => HttpResponse::Ok().body(files.join("\n").replace(".txt", "")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list sources")
	}
}

#[get("/v1/loaded_sources")]
async fn get_loaded_sources(data: Shared) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};
	HttpResponse::Ok().body(shared_data.chain.sources().join("\n"))
}

#[get("/v1/stats")]
async fn get_stats(data: Shared) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};
	HttpResponse::Ok().json(shared_data.chain.stats())
}

#[put("/v1/load_sources")]
async fn put_sources(data: Shared, query: web::Query<SourceQuery>) -> impl Responder {
	let sources = match query.names.as_deref().map(parse_sources) {
		Some(Ok(sources)) => sources,
		Some(Err(e)) => return HttpResponse::BadRequest().body(e),
		None => return HttpResponse::BadRequest().body("Missing or empty source name"),
	};

	let (data_path, order) = match data.read() {
		Ok(m) => (m.config.data_path.clone(), m.config.order),
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	};

	// Only files of the data folder can be loaded
	let available = match list_files(&data_path, "txt") {
		Ok(files) => files,
		Err(_) => return HttpResponse::InternalServerError().body("Failed to list sources"),
	};
	if let Err(e) = check_available(&available, &sources) {
		return HttpResponse::BadRequest().body(e);
	}

	// Build without holding the lock, generation keeps serving the old chain
	let chain = match build_chain(&data_path, order, &sources) {
		Ok(chain) => chain,
		Err(e) => {
			log::error!("Failed to load sources: {e}");
			return HttpResponse::InternalServerError().body(format!("Failed to load sources: {e}"));
		}
	};

	match data.write() {
		Ok(mut m) => m.chain = chain,
		Err(_) => return HttpResponse::InternalServerError().body("Chain lock failed"),
	}

	HttpResponse::Ok().body("Sources loaded successfully")
}

/// Main entry point for the server.
///
/// Loads the configuration, wraps an empty chain in a `RwLock` so that
/// generation requests can run concurrently, and starts an Actix-web HTTP
/// server. Sources are loaded through `/v1/load_sources`.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let config = Config::get().map_err(|e| std::io::Error::other(e.to_string()))?;
	let chain = MarkovChain::new(config.order).map_err(std::io::Error::other)?;
	let bind = (config.host.clone(), config.port);

	log::info!("Listening on {}:{}", bind.0, bind.1);
	let shared_data = web::Data::new(RwLock::new(SharedData { chain, config }));

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET", "PUT"]))
			.app_data(shared_data.clone())
			.service(get_generated)
			.service(get_sources)
			.service(put_sources)
			.service(get_loaded_sources)
			.service(get_stats)
	})
		.bind(bind)?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::{http::StatusCode, test as actix_test};
	use std::{env, fs};

	fn shared(chain: MarkovChain, config: Config) -> Shared {
		web::Data::new(RwLock::new(SharedData { chain, config }))
	}

	#[test]
	fn parse_sources_accepts_repeats() {
		assert_eq!(
			parse_sources("lovecraft, zarathustra:3").unwrap(),
			vec![("lovecraft".to_owned(), 1), ("zarathustra".to_owned(), 3)]
		);
		assert!(parse_sources("a:0").is_err());
		assert!(parse_sources("a:x").is_err());
		assert!(parse_sources(":2").is_err());
		assert!(parse_sources(" , ").is_err());
		assert!(parse_sources("../secret").is_err());
		assert!(parse_sources("/etc/secret:2").is_err());
		assert!(parse_sources("sub\\secret").is_err());
	}

	#[test]
	fn only_listed_sources_are_available() {
		let available = vec!["lovecraft.txt".to_owned(), "zarathustra.txt".to_owned()];
		assert!(check_available(&available, &[("zarathustra".to_owned(), 3)]).is_ok());
		assert!(check_available(&available, &[("notes".to_owned(), 1)]).is_err());
	}

	#[actix_web::test]
	async fn generate_is_reproducible_with_seed() {
		let mut chain = MarkovChain::new(1).unwrap();
		chain.ingest(["a b a c a b.", ""]);
		let app = actix_test::init_service(
			App::new().app_data(shared(chain, Config::default())).service(get_generated),
		)
		.await;

		let mut bodies = Vec::new();
		for _ in 0..2 {
			let req = actix_test::TestRequest::get().uri("/v1/generate?length=30&seed=12").to_request();
			bodies.push(actix_test::call_and_read_body(&app, req).await);
		}
		assert_eq!(bodies[0], bodies[1]);
		assert!(!bodies[0].is_empty());
	}

	#[actix_web::test]
	async fn files_outside_the_data_folder_are_refused() {
		let root = env::temp_dir().join(format!("markov-gen-outside-{}", std::process::id()));
		let data_path = root.join("data");
		fs::create_dir_all(&data_path).unwrap();
		fs::write(root.join("secret.txt"), "top secret words.\n\n").unwrap();

		let config = Config { data_path, ..Config::default() };
		let data = shared(MarkovChain::default(), config);
		let app = actix_test::init_service(
			App::new().app_data(data.clone()).service(put_sources).service(get_generated),
		)
		.await;

		for names in ["../secret", "..%2Fsecret", "secret"] {
			let uri = format!("/v1/load_sources?names={}", names);
			let req = actix_test::TestRequest::put().uri(&uri).to_request();
			assert_eq!(actix_test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
		}

		// Nothing was loaded, so there is nothing to generate from
		let req = actix_test::TestRequest::get().uri("/v1/generate?length=4&seed=1").to_request();
		assert_eq!(actix_test::call_service(&app, req).await.status(), StatusCode::INTERNAL_SERVER_ERROR);

		fs::remove_dir_all(root).unwrap();
	}

	#[actix_web::test]
	async fn length_above_the_limit_is_refused() {
		let mut chain = MarkovChain::new(1).unwrap();
		chain.ingest(["a b.", ""]);
		let config = Config { max_length: 10, ..Config::default() };
		let app = actix_test::init_service(
			App::new().app_data(shared(chain, config)).service(get_generated),
		)
		.await;

		let req = actix_test::TestRequest::get().uri("/v1/generate?length=11").to_request();
		assert_eq!(actix_test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

		let req = actix_test::TestRequest::get().uri("/v1/generate?length=10&seed=3").to_request();
		assert_eq!(actix_test::call_service(&app, req).await.status(), StatusCode::OK);
	}

	#[actix_web::test]
	async fn generate_from_empty_chain_fails() {
		let app = actix_test::init_service(
			App::new()
				.app_data(shared(MarkovChain::default(), Config::default()))
				.service(get_generated),
		)
		.await;

		let req = actix_test::TestRequest::get().uri("/v1/generate?length=5").to_request();
		let resp = actix_test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
	}

	#[actix_web::test]
	async fn load_sources_rebuilds_the_chain() {
		let dir = env::temp_dir().join(format!("markov-gen-server-{}", std::process::id()));
		fs::create_dir_all(&dir).unwrap();
		fs::write(dir.join("tiny.txt"), "one two three.\n\n").unwrap();

		let config = Config { data_path: dir.clone(), order: 2, ..Config::default() };
		let data = shared(MarkovChain::new(2).unwrap(), config);
		let app = actix_test::init_service(
			App::new()
				.app_data(data.clone())
				.service(put_sources)
				.service(get_loaded_sources)
				.service(get_stats),
		)
		.await;

		let req = actix_test::TestRequest::put().uri("/v1/load_sources?names=tiny:2").to_request();
		assert_eq!(actix_test::call_service(&app, req).await.status(), StatusCode::OK);

		let req = actix_test::TestRequest::get().uri("/v1/loaded_sources").to_request();
		assert_eq!(actix_test::call_and_read_body(&app, req).await, "tiny\ntiny");

		let req = actix_test::TestRequest::get().uri("/v1/stats").to_request();
		let stats: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;
		assert_eq!(stats["order"], 2);
		assert_eq!(stats["observations"], 8);

		let req = actix_test::TestRequest::put().uri("/v1/load_sources?names=missing").to_request();
		assert_eq!(actix_test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

		fs::remove_dir_all(dir).unwrap();
	}
}
