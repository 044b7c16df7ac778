use clap::Parser;
use parcel_address::{cli, config, error, links, ocr, records, review, scanner};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use parcel_address_common::extract;
use std::io::Read;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ログは stderr（stdout はパイプ用に空けておく）
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;
    let ocr_engine = cli.ocr_engine.unwrap_or(config.ocr_engine);

    match cli.command {
        Commands::Extract { input, json, links: print_links, max_lines, max_inspect } => {
            let raw = match input {
                Some(path) => {
                    if !path.exists() {
                        return Err(error::ParcelAddressError::FileNotFound(
                            path.display().to_string(),
                        ));
                    }
                    std::fs::read_to_string(&path)?
                }
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };

            let mut options = config.extractor.clone();
            if let Some(n) = max_lines {
                options.max_address_lines = n;
            }
            if let Some(n) = max_inspect {
                options.max_inspected_lines = n;
            }
            options.validate()?;

            let extraction = extract(&raw, &options);
            for rejected in &extraction.rejected {
                tracing::debug!("skipped line {}: {:?} ({})", rejected.index, rejected.text, rejected.rejection);
            }
            match &extraction.postcode {
                Some(postcode) => tracing::debug!("postcode {} on line {}", postcode.normalized(), postcode.index),
                None => tracing::info!("no postcode found, returning input unchanged"),
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&extraction)?);
            } else {
                println!("{}", extraction.address);
            }

            if print_links {
                let address = links::flatten_address(&extraction.address);
                for (provider, link) in links::build_links(&address, None) {
                    println!("{}: {}", provider.label(), link);
                }
            }
        }

        Commands::Scan { folder, output, recursive, use_cache, lang } => {
            println!("📦 parcel-address - label scan\n");

            // 1. 画像スキャン
            println!("[1/3] Scanning photos...");
            let images = scanner::scan_folder(&folder, recursive)?;
            println!("✔ {} photos found\n", images.len());

            if images.is_empty() {
                return Err(error::ParcelAddressError::NoImagesFound(
                    folder.display().to_string(),
                ));
            }

            // 2. OCR
            let settings = ocr::OcrSettings {
                engine: ocr_engine,
                lang: lang.unwrap_or_else(|| config.ocr_lang.clone()),
                timeout_seconds: config.timeout_seconds,
            };
            println!(
                "[2/3] Running OCR ({})...{}",
                settings.engine,
                if use_cache { " (cache enabled)" } else { "" }
            );
            let outputs = if use_cache {
                let mut cache = ocr::CacheFile::load(&folder);
                let outputs = ocr::recognize_images(&images, &settings, Some(&mut cache)).await;
                cache.save(&folder)?;
                outputs
            } else {
                ocr::recognize_images(&images, &settings, None).await
            };
            let cached = outputs.iter().filter(|o| o.cached).count();
            tracing::info!("OCR finished: {} images ({} from cache)", outputs.len(), cached);
            println!("✔ OCR done\n");

            // 3. 住所抽出・保存
            println!("[3/3] Extracting addresses...");
            let results = records::build_records(&outputs, &config.extractor);
            let found = results.iter().filter(|r| r.postcode.is_some()).count();
            let output = output.unwrap_or_else(|| folder.join("addresses.json"));
            records::write_records(&output, &results)?;
            println!("✔ Postcode found in {}/{} photos", found, results.len());
            println!("✔ Saved: {}", output.display());

            println!("\n✅ Done. Run `parcel-address review {}` to check the results.", output.display());
        }

        Commands::Review { input, output, provider } => {
            println!("📦 parcel-address - review\n");
            let provider = provider.unwrap_or(config.map_provider);
            review::run_interactive_review(&input, output.as_deref(), provider)?;
        }

        Commands::Links { address, provider } => {
            let address = links::flatten_address(&address);
            for (provider, link) in links::build_links(&address, provider) {
                println!("{}: {}", provider.label(), link);
            }
        }

        Commands::Config { set_ocr_engine, set_map_provider, set_lang, show } => {
            let mut config = config;
            let mut changed = false;

            if let Some(engine) = set_ocr_engine {
                config.ocr_engine = engine;
                changed = true;
            }
            if let Some(provider) = set_map_provider {
                config.map_provider = provider;
                changed = true;
            }
            if let Some(lang) = set_lang {
                config.ocr_lang = lang;
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ Settings saved: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("Settings:");
                println!("  OCR engine: {}", config.ocr_engine);
                println!("  OCR language: {}", config.ocr_lang);
                println!("  OCR timeout: {}s", config.timeout_seconds);
                println!("  Map service: {}", config.map_provider);
                println!("  Max address lines: {}", config.extractor.max_address_lines);
                println!("  Max inspected lines: {}", config.extractor.max_inspected_lines);
            }
        }

        Commands::Cache { clear, folder, info } => {
            let target = folder.unwrap_or_else(|| PathBuf::from("."));
            let cache_path = ocr::CacheFile::cache_path(&target);

            if info || !clear {
                if cache_path.exists() {
                    let cache = ocr::CacheFile::load(&target);
                    println!("OCR cache:");
                    println!("  Path: {}", cache_path.display());
                    println!("  Entries: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  Size: {} bytes", meta.len());
                    }
                } else {
                    println!("No cache file: {}", cache_path.display());
                }
            }

            if clear {
                match ocr::CacheFile::clear(&target) {
                    Ok(true) => println!("✔ Cache deleted: {}", cache_path.display()),
                    Ok(false) => println!("No cache file"),
                    Err(e) => println!("Failed to delete cache: {}", e),
                }
            }
        }
    }

    Ok(())
}
