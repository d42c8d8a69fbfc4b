use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use vendorq_core::flatten_vendor;
use vendorq_similarity::{QualificationQuery, VendorQualifier};
use vendorq_storage::CorpusStore;

const DEFAULT_FEATURE_LIMIT: usize = 20;

#[derive(Deserialize)]
struct VendorsQuery {
    category: Option<String>,
}

#[derive(Deserialize)]
struct FeaturesQuery {
    category: Option<String>,
    limit: Option<usize>,
}

#[derive(Serialize)]
struct VendorSummary {
    product_name: String,
    vendor: String,
    main_category: String,
    rating: f32,
    feature_count: usize,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(
        store: Arc<CorpusStore>,
        qualifier: Arc<VendorQualifier>,
        port: u16,
    ) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(store.clone()))
                .app_data(web::Data::new(qualifier.clone()))
                .route("/", web::get().to(service_info))
                .route("/health", web::get().to(health))
                .route("/vendor_qualification", web::post().to(vendor_qualification))
                .route("/categories", web::get().to(list_categories))
                .route("/vendors", web::get().to(list_vendors))
                .route("/features", web::get().to(top_features))
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

async fn vendor_qualification(
    store: web::Data<Arc<CorpusStore>>,
    qualifier: web::Data<Arc<VendorQualifier>>,
    req: web::Json<QualificationQuery>,
) -> ActixResult<HttpResponse> {
    let corpus = store.snapshot();
    debug!(
        capabilities = req.capabilities.len(),
        category = req.software_category.as_deref().unwrap_or("all"),
        "qualification request"
    );

    match qualifier.qualify(&corpus, &req) {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": e.to_string()
        }))),
    }
}

async fn list_categories(store: web::Data<Arc<CorpusStore>>) -> ActixResult<HttpResponse> {
    let corpus = store.snapshot();
    let categories: Vec<serde_json::Value> = corpus
        .category_counts()
        .into_iter()
        .map(|(name, vendors)| {
            serde_json::json!({
                "name": name,
                "vendors": vendors
            })
        })
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "total_categories": categories.len(),
        "categories": categories
    })))
}

async fn list_vendors(
    store: web::Data<Arc<CorpusStore>>,
    query: web::Query<VendorsQuery>,
) -> ActixResult<HttpResponse> {
    let corpus = store.snapshot();
    let filtered = corpus.filter_by_category(query.category.as_deref().unwrap_or(""));

    let vendors: Vec<VendorSummary> = filtered
        .records()
        .iter()
        .enumerate()
        .map(|(idx, record)| VendorSummary {
            product_name: record.product_name.clone(),
            vendor: record.vendor.clone(),
            main_category: record.main_category.clone(),
            rating: record.rating,
            feature_count: flatten_vendor(idx, record).len(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "total_vendors": vendors.len(),
        "vendors": vendors
    })))
}

async fn top_features(
    store: web::Data<Arc<CorpusStore>>,
    query: web::Query<FeaturesQuery>,
) -> ActixResult<HttpResponse> {
    let corpus = store.snapshot();
    let filtered = corpus.filter_by_category(query.category.as_deref().unwrap_or(""));
    let limit = query.limit.unwrap_or(DEFAULT_FEATURE_LIMIT);

    let features: Vec<serde_json::Value> = filtered
        .top_features(limit)
        .into_iter()
        .map(|(name, occurrences)| {
            serde_json::json!({
                "name": name,
                "occurrences": occurrences
            })
        })
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "returned": features.len(),
        "features": features
    })))
}

async fn health(store: web::Data<Arc<CorpusStore>>) -> ActixResult<HttpResponse> {
    let corpus = store.snapshot();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "vendors": corpus.len(),
        "categories": corpus.category_counts().len()
    })))
}

async fn service_info(qualifier: web::Data<Arc<VendorQualifier>>) -> ActixResult<HttpResponse> {
    let config = qualifier.config();
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "service": "vendorq",
        "version": env!("CARGO_PKG_VERSION"),
        "defaults": {
            "similarity_threshold": config.similarity_threshold,
            "feature_weight": config.feature_weight,
            "rating_weight": config.rating_weight,
            "top_n": config.top_n
        },
        "endpoints": {
            "POST /vendor_qualification": "rank vendors against desired capabilities",
            "GET /categories": "vendor counts per category",
            "GET /vendors": "vendor summaries, optional ?category= substring filter",
            "GET /features": "most common feature names, optional ?category= and ?limit=",
            "GET /health": "service health and corpus size"
        },
        "example_query": {
            "software_category": "CRM Software",
            "capabilities": ["Lead Management", "Email Integration"],
            "similarity_threshold": 0.4,
            "top_n": 5
        }
    })))
}
