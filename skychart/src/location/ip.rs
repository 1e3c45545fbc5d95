//! IP geolocation through free public JSON services.
//!
//! Only city-level accurate. Each service has its own response shape; the
//! parsers are pure so they can be tested without a network.

use std::time::Duration;

use ephemeris::ObserverLocation;
use log::{debug, warn};
use serde::Deserialize;

use super::{LocationError, LocationProvider, LocationSource, ResolvedLocation};

/// Supported geolocation services, tried in this order by default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoService {
    IpApi,
    IpApiCo,
    IpInfo,
}

impl GeoService {
    pub const ALL: [GeoService; 3] = [GeoService::IpApi, GeoService::IpApiCo, GeoService::IpInfo];

    pub fn name(self) -> &'static str {
        match self {
            GeoService::IpApi => "ip-api.com",
            GeoService::IpApiCo => "ipapi.co",
            GeoService::IpInfo => "ipinfo.io",
        }
    }

    pub fn url(self) -> &'static str {
        match self {
            GeoService::IpApi => "http://ip-api.com/json",
            GeoService::IpApiCo => "https://ipapi.co/json",
            GeoService::IpInfo => "https://ipinfo.io/json",
        }
    }
}

#[derive(Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
    country: Option<String>,
}

#[derive(Deserialize)]
struct IpApiCoResponse {
    #[serde(default)]
    error: bool,
    reason: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    city: Option<String>,
    country_name: Option<String>,
}

#[derive(Deserialize)]
struct IpInfoResponse {
    loc: Option<String>,
    city: Option<String>,
    country: Option<String>,
}

/// Coordinates and place names extracted from one response
struct GeoFix {
    latitude: f64,
    longitude: f64,
    city: Option<String>,
    country: Option<String>,
}

fn rejected(service: GeoService, reason: impl Into<String>) -> LocationError {
    LocationError::ServiceRejected {
        service: service.name().to_string(),
        reason: reason.into(),
    }
}

fn parse_ip_api(body: &str) -> Result<GeoFix, LocationError> {
    let service = GeoService::IpApi;
    let resp: IpApiResponse =
        serde_json::from_str(body).map_err(|e| rejected(service, e.to_string()))?;
    if resp.status != "success" {
        return Err(rejected(
            service,
            resp.message.unwrap_or_else(|| format!("status {}", resp.status)),
        ));
    }
    match (resp.lat, resp.lon) {
        (Some(latitude), Some(longitude)) => Ok(GeoFix {
            latitude,
            longitude,
            city: resp.city,
            country: resp.country,
        }),
        _ => Err(rejected(service, "response has no coordinates")),
    }
}

fn parse_ipapi_co(body: &str) -> Result<GeoFix, LocationError> {
    let service = GeoService::IpApiCo;
    let resp: IpApiCoResponse =
        serde_json::from_str(body).map_err(|e| rejected(service, e.to_string()))?;
    if resp.error {
        return Err(rejected(
            service,
            resp.reason.unwrap_or_else(|| "error".to_string()),
        ));
    }
    match (resp.latitude, resp.longitude) {
        (Some(latitude), Some(longitude)) => Ok(GeoFix {
            latitude,
            longitude,
            city: resp.city,
            country: resp.country_name,
        }),
        _ => Err(rejected(service, "response has no coordinates")),
    }
}

fn parse_ipinfo(body: &str) -> Result<GeoFix, LocationError> {
    let service = GeoService::IpInfo;
    let resp: IpInfoResponse =
        serde_json::from_str(body).map_err(|e| rejected(service, e.to_string()))?;
    let loc = resp
        .loc
        .ok_or_else(|| rejected(service, "response has no coordinates"))?;
    let (lat, lon) = loc
        .split_once(',')
        .ok_or_else(|| rejected(service, format!("malformed loc '{loc}'")))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<f64>()
            .map_err(|_| rejected(service, format!("malformed loc '{loc}'")))
    };
    Ok(GeoFix {
        latitude: parse(lat)?,
        longitude: parse(lon)?,
        city: resp.city,
        country: resp.country,
    })
}

/// Parse a raw response body from `service` into a location.
pub fn parse_service_response(
    service: GeoService,
    body: &str,
) -> Result<ResolvedLocation, LocationError> {
    let fix = match service {
        GeoService::IpApi => parse_ip_api(body)?,
        GeoService::IpApiCo => parse_ipapi_co(body)?,
        GeoService::IpInfo => parse_ipinfo(body)?,
    };
    Ok(ResolvedLocation {
        location: ObserverLocation::new(fix.latitude, fix.longitude, 0.0)?,
        display_name: fix.city.filter(|c| !c.is_empty()),
        country: fix.country.filter(|c| !c.is_empty()),
        source: LocationSource::IpGeolocation,
    })
}

/// Locate the machine by its public IP address.
pub struct IpGeolocation {
    services: Vec<GeoService>,
    timeout: Duration,
}

impl Default for IpGeolocation {
    fn default() -> Self {
        Self {
            services: GeoService::ALL.to_vec(),
            timeout: Duration::from_secs(5),
        }
    }
}

impl IpGeolocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_services(mut self, services: Vec<GeoService>) -> Self {
        self.services = services;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn fetch(agent: &ureq::Agent, service: GeoService) -> Result<String, LocationError> {
        let network = |e: ureq::Error| LocationError::Network {
            service: service.name().to_string(),
            message: e.to_string(),
        };
        let mut response = agent.get(service.url()).call().map_err(network)?;
        response.body_mut().read_to_string().map_err(network)
    }
}

impl LocationProvider for IpGeolocation {
    fn name(&self) -> &str {
        "IP geolocation"
    }

    fn locate(&self) -> Result<ResolvedLocation, LocationError> {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .build();
        let agent = ureq::Agent::new_with_config(config);

        let mut failures = Vec::new();
        for &service in &self.services {
            debug!("Querying {}", service.url());
            let result = Self::fetch(&agent, service)
                .and_then(|body| parse_service_response(service, &body));
            match result {
                Ok(resolved) => return Ok(resolved),
                Err(err) => {
                    warn!("{err}");
                    failures.push(err.to_string());
                }
            }
        }
        Err(LocationError::NoResult(if failures.is_empty() {
            "no geolocation services configured".to_string()
        } else {
            failures.join("; ")
        }))
    }
}
