//! # API REST
//!
//! REST API implementation for VetPR.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status mapping)
//!
//! Uses `api-shared` for the wire types. All domain rules live in
//! `vetpr-core`; handlers only parse, delegate and map errors to status
//! codes: invalid input is 400, a dangling reference 404, a conflict
//! (duplicate RUT, occupied slot, referenced records) 409, a slot outside
//! working hours 422, and anything else 500 with the full error logged.

use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    AppointmentDto, AvailabilityRes, BookAppointmentReq, ClientDto, CreateClientReq, CreatePetReq,
    HealthRes, HealthService, ListAppointmentsRes, ListClientsRes, ListPetsRes,
    ListPractitionersRes, PetDto, PractitionerDto, UpdateClientReq,
};
use randomuser::RandomUserClient;
use vetpr_core::repositories::{AppointmentService, ClientService, PetService, PractitionerService};
use vetpr_core::{
    scheduling, search, validation, Appointment, AppointmentKind, Client, CoreConfig,
    NewAppointment, NonEmptyText, Pet, Practitioner, PracticeError, Rut,
};

/// Application state shared across REST API handlers.
///
/// Contains the startup-resolved core configuration and, when photo
/// enrichment is enabled, the random-user API client.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<CoreConfig>,
    pub photos: Option<Arc<RandomUserClient>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_clients,
        create_client,
        update_client,
        delete_client,
        list_pets,
        create_pet,
        delete_pet,
        list_practitioners,
        availability,
        list_appointments,
        book_appointment,
        cancel_appointment,
    ),
    components(schemas(
        HealthRes,
        ClientDto,
        CreateClientReq,
        UpdateClientReq,
        ListClientsRes,
        PetDto,
        CreatePetReq,
        ListPetsRes,
        PractitionerDto,
        ListPractitionersRes,
        AppointmentDto,
        BookAppointmentReq,
        ListAppointmentsRes,
        AvailabilityRes,
    ))
)]
struct ApiDoc;

/// Builds the full API router with Swagger UI and CORS.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/clients", get(list_clients))
        .route("/clients", post(create_client))
        .route("/clients/:rut", put(update_client))
        .route("/clients/:rut", delete(delete_client))
        .route("/pets", get(list_pets))
        .route("/pets", post(create_pet))
        .route("/pets/:id", delete(delete_pet))
        .route("/practitioners", get(list_practitioners))
        .route("/practitioners/:name/availability", get(availability))
        .route("/appointments", get(list_appointments))
        .route("/appointments", post(book_appointment))
        .route("/appointments/:id", delete(cancel_appointment))
        .merge(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ============================================================================
// ERROR MAPPING
// ============================================================================

fn error_status(err: &PracticeError) -> StatusCode {
    match err {
        PracticeError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        PracticeError::UnknownClient(_)
        | PracticeError::UnknownPet(_)
        | PracticeError::UnknownPractitioner(_)
        | PracticeError::UnknownAppointment(_) => StatusCode::NOT_FOUND,
        PracticeError::DuplicateRut(_)
        | PracticeError::DuplicatePractitioner(_)
        | PracticeError::ClientHasPets(_)
        | PracticeError::PetHasAppointments(_)
        | PracticeError::SlotTaken { .. } => StatusCode::CONFLICT,
        PracticeError::SlotOutsideSchedule { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps a core error to a response, logging it with the handler context.
fn error_response(context: &str, err: PracticeError) -> (StatusCode, String) {
    let status = error_status(&err);
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("{context} error: {err:?}");
        (status, "Internal error".to_string())
    } else {
        tracing::warn!("{context} rejected: {err}");
        (status, err.to_string())
    }
}

// ============================================================================
// DTO MAPPING
// ============================================================================

fn format_slot(slot: NaiveTime) -> String {
    slot.format("%H:%M").to_string()
}

fn parse_date(input: &str) -> Result<NaiveDate, PracticeError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        PracticeError::InvalidInput(format!("expected a date in YYYY-MM-DD form, got '{input}'"))
    })
}

fn parse_slot(input: &str) -> Result<NaiveTime, PracticeError> {
    NaiveTime::parse_from_str(input, "%H:%M").map_err(|_| {
        PracticeError::InvalidInput(format!("expected a slot in HH:MM form, got '{input}'"))
    })
}

fn client_to_dto(client: Client) -> ClientDto {
    ClientDto {
        rut: client.rut.to_string(),
        name: client.name.to_string(),
        email: client.email.to_string(),
        phone: client.phone.to_string(),
        photo_url: client.photo_url,
    }
}

fn pet_to_dto(pet: Pet) -> PetDto {
    PetDto {
        id: pet.id,
        name: pet.name.to_string(),
        species: pet.species,
        breed: pet.breed,
        age_years: pet.age_years,
        owner_rut: pet.owner_rut.to_string(),
        photo_url: pet.photo_url,
    }
}

fn practitioner_to_dto(practitioner: Practitioner) -> PractitionerDto {
    PractitionerDto {
        name: practitioner.name,
        specialty: practitioner.specialty,
        schedule: practitioner.schedule.into_iter().map(format_slot).collect(),
        photo_url: practitioner.photo_url,
    }
}

fn appointment_to_dto(appointment: Appointment) -> AppointmentDto {
    AppointmentDto {
        id: appointment.id,
        pet_id: appointment.pet_id,
        practitioner: appointment.practitioner,
        date: appointment.date.to_string(),
        slot: format_slot(appointment.slot),
        kind: appointment.kind.to_string(),
        reason: appointment.reason.to_string(),
        notes: appointment.notes,
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

/// Free-text search parameter shared by the list endpoints.
#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

#[utoipa::path(
    get,
    path = "/clients",
    params(("q" = Option<String>, Query, description = "Filter by name or RUT substring")),
    responses(
        (status = 200, description = "List of clients", body = ListClientsRes)
    )
)]
/// List registered clients
///
/// With `q`, returns only clients whose name or RUT contains the query
/// (case-insensitive); a blank query returns everyone.
#[axum::debug_handler]
async fn list_clients(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<ListClientsRes> {
    let clients = ClientService::new(state.cfg.clone()).list();
    let query = params.q.unwrap_or_default();
    let filtered: Vec<ClientDto> = search::filter_clients(&clients, &query)
        .into_iter()
        .cloned()
        .map(client_to_dto)
        .collect();
    Json(ListClientsRes { clients: filtered })
}

#[utoipa::path(
    post,
    path = "/clients",
    request_body = CreateClientReq,
    responses(
        (status = 200, description = "Client registered", body = ClientDto),
        (status = 400, description = "Invalid field"),
        (status = 409, description = "RUT already registered")
    )
)]
/// Register a new client
///
/// Validates every field before touching storage. When photo enrichment is
/// enabled and the request carries no photo URL, a portrait is fetched from
/// the random-user API; if that fails the client is registered without a
/// photo and a warning is logged.
#[axum::debug_handler]
async fn create_client(
    State(state): State<AppState>,
    Json(req): Json<CreateClientReq>,
) -> Result<Json<ClientDto>, (StatusCode, String)> {
    let mut client =
        validation::parse_client(&req.name, &req.email, &req.phone, &req.rut, req.photo_url)
            .map_err(|e| error_response("create client", e))?;

    if client.photo_url.is_none() {
        if let Some(photos) = &state.photos {
            match photos.portrait_url().await {
                Ok(url) => client.photo_url = Some(url),
                Err(e) => {
                    tracing::warn!("registering client without photo: {e}");
                }
            }
        }
    }

    let service = ClientService::new(state.cfg.clone());
    match service.register(client.clone()) {
        Ok(()) => Ok(Json(client_to_dto(client))),
        Err(e) => Err(error_response("create client", e)),
    }
}

#[utoipa::path(
    put,
    path = "/clients/{rut}",
    request_body = UpdateClientReq,
    responses(
        (status = 200, description = "Client updated", body = ClientDto),
        (status = 400, description = "Invalid field"),
        (status = 404, description = "Unknown client"),
        (status = 409, description = "New RUT already registered")
    )
)]
/// Update a registered client
///
/// A RUT change re-keys the record; the new RUT must not belong to another
/// client.
#[axum::debug_handler]
async fn update_client(
    State(state): State<AppState>,
    AxumPath(rut): AxumPath<String>,
    Json(req): Json<UpdateClientReq>,
) -> Result<Json<ClientDto>, (StatusCode, String)> {
    let rut = Rut::parse(&rut)
        .map_err(|e| error_response("update client", PracticeError::InvalidInput(format!("rut: {e}"))))?;
    let updated =
        validation::parse_client(&req.name, &req.email, &req.phone, &req.rut, req.photo_url)
            .map_err(|e| error_response("update client", e))?;

    let service = ClientService::new(state.cfg.clone());
    match service.update(&rut, updated.clone()) {
        Ok(()) => Ok(Json(client_to_dto(updated))),
        Err(e) => Err(error_response("update client", e)),
    }
}

#[utoipa::path(
    delete,
    path = "/clients/{rut}",
    responses(
        (status = 200, description = "Client removed"),
        (status = 404, description = "Unknown client"),
        (status = 409, description = "Client still has pets")
    )
)]
/// Remove a registered client
///
/// Refused while pets still reference the client.
#[axum::debug_handler]
async fn delete_client(
    State(state): State<AppState>,
    AxumPath(rut): AxumPath<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let rut = Rut::parse(&rut)
        .map_err(|e| error_response("delete client", PracticeError::InvalidInput(format!("rut: {e}"))))?;

    let service = ClientService::new(state.cfg.clone());
    match service.remove(&rut) {
        Ok(()) => Ok(StatusCode::OK),
        Err(e) => Err(error_response("delete client", e)),
    }
}

#[utoipa::path(
    get,
    path = "/pets",
    params(("q" = Option<String>, Query, description = "Filter by pet name or species substring")),
    responses(
        (status = 200, description = "List of pets", body = ListPetsRes)
    )
)]
/// List registered pets
///
/// With `q`, returns only pets whose name or species contains the query
/// (case-insensitive); a blank query returns all of them.
#[axum::debug_handler]
async fn list_pets(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<ListPetsRes> {
    let pets = PetService::new(state.cfg.clone()).list();
    let query = params.q.unwrap_or_default();
    let filtered: Vec<PetDto> = search::filter_pets(&pets, &query)
        .into_iter()
        .cloned()
        .map(pet_to_dto)
        .collect();
    Json(ListPetsRes { pets: filtered })
}

#[utoipa::path(
    post,
    path = "/pets",
    request_body = CreatePetReq,
    responses(
        (status = 200, description = "Pet registered", body = PetDto),
        (status = 400, description = "Invalid field"),
        (status = 404, description = "Unknown owner")
    )
)]
/// Register a new pet
///
/// The owner must already be a registered client.
#[axum::debug_handler]
async fn create_pet(
    State(state): State<AppState>,
    Json(req): Json<CreatePetReq>,
) -> Result<Json<PetDto>, (StatusCode, String)> {
    let new_pet = validation::parse_new_pet(
        &req.name,
        &req.species,
        &req.breed,
        req.age_years,
        &req.owner_rut,
        req.photo_url,
    )
    .map_err(|e| error_response("create pet", e))?;

    let service = PetService::new(state.cfg.clone());
    match service.register(new_pet) {
        Ok(pet) => Ok(Json(pet_to_dto(pet))),
        Err(e) => Err(error_response("create pet", e)),
    }
}

#[utoipa::path(
    delete,
    path = "/pets/{id}",
    responses(
        (status = 200, description = "Pet removed"),
        (status = 404, description = "Unknown pet"),
        (status = 409, description = "Pet still has appointments")
    )
)]
/// Remove a registered pet
///
/// Refused while appointments still reference the pet.
#[axum::debug_handler]
async fn delete_pet(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let service = PetService::new(state.cfg.clone());
    match service.remove(&id) {
        Ok(()) => Ok(StatusCode::OK),
        Err(e) => Err(error_response("delete pet", e)),
    }
}

#[utoipa::path(
    get,
    path = "/practitioners",
    responses(
        (status = 200, description = "Practitioner roster", body = ListPractitionersRes)
    )
)]
/// List the practitioner roster
#[axum::debug_handler]
async fn list_practitioners(State(state): State<AppState>) -> Json<ListPractitionersRes> {
    let practitioners = PractitionerService::new(state.cfg.clone())
        .list()
        .into_iter()
        .map(practitioner_to_dto)
        .collect();
    Json(ListPractitionersRes { practitioners })
}

/// Query parameters for the availability endpoint.
#[derive(Debug, Deserialize)]
struct AvailabilityParams {
    /// Target date, `YYYY-MM-DD`.
    date: String,
    /// Optional cut-off, `HH:MM`: drop slots at or before this time. Callers
    /// pass the current time when the target date is today.
    after: Option<String>,
}

#[utoipa::path(
    get,
    path = "/practitioners/{name}/availability",
    params(
        ("name" = String, Path, description = "Practitioner name"),
        ("date" = String, Query, description = "Target date, YYYY-MM-DD"),
        ("after" = Option<String>, Query, description = "Drop slots at or before this HH:MM time")
    ),
    responses(
        (status = 200, description = "Open slots", body = AvailabilityRes),
        (status = 400, description = "Malformed date or time"),
        (status = 404, description = "Unknown practitioner")
    )
)]
/// Open slots for a practitioner on a date
///
/// Returns the practitioner's schedule minus the slots already booked for
/// that date. The `after` parameter is the caller-side "today" refinement:
/// pass the current wall-clock time to hide slots that have already started.
#[axum::debug_handler]
async fn availability(
    State(state): State<AppState>,
    AxumPath(name): AxumPath<String>,
    Query(params): Query<AvailabilityParams>,
) -> Result<Json<AvailabilityRes>, (StatusCode, String)> {
    let date = parse_date(&params.date).map_err(|e| error_response("availability", e))?;

    let service = AppointmentService::new(state.cfg.clone());
    let mut slots = service
        .available_slots(&name, date)
        .map_err(|e| error_response("availability", e))?;

    if let Some(after) = params.after {
        let after = parse_slot(&after).map_err(|e| error_response("availability", e))?;
        slots = scheduling::without_elapsed(slots, after);
    }

    Ok(Json(AvailabilityRes {
        practitioner: name,
        date: date.to_string(),
        slots: slots.into_iter().map(format_slot).collect(),
    }))
}

/// Query parameters for the appointment listing.
#[derive(Debug, Deserialize)]
struct AppointmentListParams {
    /// Restrict to one date, `YYYY-MM-DD`.
    date: Option<String>,
}

#[utoipa::path(
    get,
    path = "/appointments",
    params(("date" = Option<String>, Query, description = "Restrict to one date, YYYY-MM-DD")),
    responses(
        (status = 200, description = "List of appointments", body = ListAppointmentsRes),
        (status = 400, description = "Malformed date")
    )
)]
/// List appointments, sorted by date and slot
#[axum::debug_handler]
async fn list_appointments(
    State(state): State<AppState>,
    Query(params): Query<AppointmentListParams>,
) -> Result<Json<ListAppointmentsRes>, (StatusCode, String)> {
    let service = AppointmentService::new(state.cfg.clone());

    let appointments = match params.date {
        Some(date) => {
            let date = parse_date(&date).map_err(|e| error_response("list appointments", e))?;
            service.on_date(date)
        }
        None => {
            let mut all = service.list();
            all.sort_by_key(|a| (a.date, a.slot));
            all
        }
    };

    Ok(Json(ListAppointmentsRes {
        appointments: appointments.into_iter().map(appointment_to_dto).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/appointments",
    request_body = BookAppointmentReq,
    responses(
        (status = 200, description = "Appointment booked", body = AppointmentDto),
        (status = 400, description = "Malformed field"),
        (status = 404, description = "Unknown practitioner or pet"),
        (status = 409, description = "Slot already taken"),
        (status = 422, description = "Slot outside working hours")
    )
)]
/// Book an appointment
///
/// The slot must be one of the practitioner's working slots and still free
/// for the requested date.
#[axum::debug_handler]
async fn book_appointment(
    State(state): State<AppState>,
    Json(req): Json<BookAppointmentReq>,
) -> Result<Json<AppointmentDto>, (StatusCode, String)> {
    let date = parse_date(&req.date).map_err(|e| error_response("book appointment", e))?;
    let slot = parse_slot(&req.slot).map_err(|e| error_response("book appointment", e))?;
    let kind: AppointmentKind = req
        .kind
        .parse()
        .map_err(|e: String| error_response("book appointment", PracticeError::InvalidInput(e)))?;
    let reason = NonEmptyText::new(&req.reason).map_err(|e| {
        error_response(
            "book appointment",
            PracticeError::InvalidInput(format!("reason: {e}")),
        )
    })?;

    let service = AppointmentService::new(state.cfg.clone());
    match service.book(NewAppointment {
        pet_id: req.pet_id,
        practitioner: req.practitioner,
        date,
        slot,
        kind,
        reason,
        notes: req.notes,
    }) {
        Ok(appointment) => Ok(Json(appointment_to_dto(appointment))),
        Err(e) => Err(error_response("book appointment", e)),
    }
}

#[utoipa::path(
    delete,
    path = "/appointments/{id}",
    responses(
        (status = 200, description = "Appointment cancelled"),
        (status = 404, description = "Unknown appointment")
    )
)]
/// Cancel an appointment
///
/// Frees the slot for new bookings.
#[axum::debug_handler]
async fn cancel_appointment(
    State(state): State<AppState>,
    AxumPath(id): AxumPath<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let service = AppointmentService::new(state.cfg.clone());
    match service.cancel(&id) {
        Ok(()) => Ok(StatusCode::OK),
        Err(e) => Err(error_response("cancel appointment", e)),
    }
}
