//! Patient CRUD handlers
//!
//! Each handler goes through the injected `PatientStore`; there is no
//! in-process cache of the record set.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{AppState, AppError, AppResult};
use crate::models::{CreatePatient, PatientRecord, UpdatePatient};

/// Full patient object as returned by create/update, id included.
#[derive(Serialize)]
pub struct PatientWithId {
    pub id: String,
    #[serde(flatten)]
    pub record: PatientRecord,
}

#[derive(Serialize)]
pub struct PatientEnvelope {
    pub message: &'static str,
    pub patient: PatientWithId,
}

/// List all patients
pub async fn view_all(
    State(state): State<AppState>,
) -> AppResult<Json<BTreeMap<String, PatientRecord>>> {
    let data = state.store.load_all()?;
    if data.is_empty() {
        return Err(AppError::NotFound("No patients found".to_string()));
    }
    Ok(Json(data))
}

/// Get a single patient by id
pub async fn view_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<PatientRecord>> {
    state.store.get(&id)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Patient not found".to_string()))
}

#[derive(Debug, Deserialize)]
pub struct SortParams {
    pub sort_by: String,
    pub order: Option<String>,
}

const SORT_FIELDS: [&str; 3] = ["height", "weight", "bmi"];

fn sort_key(record: &PatientRecord, field: &str) -> f64 {
    match field {
        "height" => record.height,
        "weight" => record.weight,
        _ => record.bmi,
    }
}

/// Sort patients by height, weight or bmi
pub async fn sort(
    State(state): State<AppState>,
    Query(params): Query<SortParams>,
) -> AppResult<Json<Vec<PatientRecord>>> {
    if !SORT_FIELDS.contains(&params.sort_by.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Invalid sort field. Valid fields are: {}",
            SORT_FIELDS.join(", ")
        )));
    }

    let descending = match params.order.as_deref().unwrap_or("asc") {
        "asc" => false,
        "desc" => true,
        _ => return Err(AppError::BadRequest("Order must be 'asc' or 'desc'".to_string())),
    };

    let mut records: Vec<PatientRecord> = state.store.load_all()?.into_values().collect();
    // Stable sort: ties keep the file iteration order (Equal stays Equal
    // under reverse()).
    records.sort_by(|a, b| {
        let ord = sort_key(a, &params.sort_by)
            .partial_cmp(&sort_key(b, &params.sort_by))
            .unwrap_or(Ordering::Equal);
        if descending { ord.reverse() } else { ord }
    });

    Ok(Json(records))
}

/// Create a new patient
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreatePatient>,
) -> AppResult<Json<PatientEnvelope>> {
    req.validate().map_err(AppError::Validation)?;

    if state.store.get(&req.id)?.is_some() {
        return Err(AppError::AlreadyExists(
            "Patient with this ID already exists".to_string(),
        ));
    }

    let (id, record) = req.into_record();
    state.store.upsert(&id, record.clone())?;
    tracing::info!("Created patient {}", id);

    Ok(Json(PatientEnvelope {
        message: "Patient created successfully",
        patient: PatientWithId { id, record },
    }))
}

/// Partially update an existing patient. Derived bmi/verdict are snapshots
/// taken at creation and are not recomputed here.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdatePatient>,
) -> AppResult<Json<PatientEnvelope>> {
    req.validate().map_err(AppError::Validation)?;

    let mut record = state.store.get(&id)?
        .ok_or_else(|| AppError::NotFound("Patient not found".to_string()))?;

    req.apply(&mut record);
    state.store.upsert(&id, record.clone())?;
    tracing::info!("Updated patient {}", id);

    Ok(Json(PatientEnvelope {
        message: "Patient updated successfully",
        patient: PatientWithId { id, record },
    }))
}

/// Delete a patient
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    if !state.store.delete(&id)? {
        return Err(AppError::NotFound("Patient not found".to_string()));
    }
    tracing::info!("Deleted patient {}", id);

    Ok(Json(json!({ "message": "Patient deleted successfully" })))
}
