//! Localized user-facing messages keyed by the error identifiers the backend and client emit.

/// Error identifiers with a localized rendering.
pub mod ids {
	/// Session lifetime ended on the server.
	pub const SESSION_EXPIRED: &str = "Session expired";
	/// Generic 401 without a specific reason.
	pub const UNAUTHORIZED: &str = "Unauthorized";
	/// Access token rejected as expired.
	pub const TOKEN_EXPIRED: &str = "Token expired";
	/// Server no longer knows this device.
	pub const DEVICE_NOT_FOUND: &str = "Device not found";
	/// Device access was revoked by an administrator.
	pub const DEVICE_REVOKED: &str = "Device revoked";
	/// Activation key was blocked.
	pub const ADMIN_KEY_BLOCKED: &str = "Admin key blocked";
	/// Activation key was deleted.
	pub const ADMIN_KEY_DELETED: &str = "Admin key deleted";
	/// Activation key expired.
	pub const ADMIN_KEY_EXPIRED: &str = "Admin key expired";
	/// Device is no longer bound to an activation key.
	pub const DEVICE_UNBOUND: &str = "Device unbound";
	/// Refresh endpoint rejected the rotation.
	pub const REFRESH_FAILED: &str = "Token refresh failed";
	/// Stored auth state has no refresh token.
	pub const MISSING_REFRESH_TOKEN: &str = "No refresh token available";
	/// Generic network failure.
	pub const NETWORK_ERROR: &str = "Network error";
	/// Request exceeded its time budget.
	pub const TIMEOUT: &str = "Request timeout";
	/// Connectivity failure reported by the transport.
	pub const FETCH_FAILED: &str = "Failed to fetch";
	/// Terminal 401 outcome surfaced after invalidation.
	pub const REDIRECTING: &str = "Unauthorized - redirecting to activation";
	/// No access token stored locally.
	pub const NOT_AUTHENTICATED: &str = "Not authenticated";
}

const CATALOG: &[(&str, &str)] = &[
	(ids::SESSION_EXPIRED, "Sua sessão expirou. Ative o aplicativo novamente."),
	(ids::UNAUTHORIZED, "Acesso não autorizado. Ative o aplicativo novamente."),
	(ids::TOKEN_EXPIRED, "Seu token de acesso expirou."),
	(ids::DEVICE_NOT_FOUND, "Dispositivo não encontrado."),
	(ids::DEVICE_REVOKED, "O acesso deste dispositivo foi revogado."),
	(ids::ADMIN_KEY_BLOCKED, "A chave de ativação foi bloqueada."),
	(ids::ADMIN_KEY_DELETED, "A chave de ativação foi excluída."),
	(ids::ADMIN_KEY_EXPIRED, "A chave de ativação expirou."),
	(ids::DEVICE_UNBOUND, "Este dispositivo não está mais vinculado a uma chave de ativação."),
	(ids::REFRESH_FAILED, "Não foi possível renovar a sessão."),
	(ids::MISSING_REFRESH_TOKEN, "Token de renovação ausente. Ative o aplicativo novamente."),
	(ids::NETWORK_ERROR, "Erro de rede. Verifique sua conexão."),
	(ids::TIMEOUT, "A requisição excedeu o tempo limite."),
	(ids::FETCH_FAILED, "Falha de conexão com o servidor. Verifique sua internet."),
	(ids::REDIRECTING, "Não autorizado. Redirecionando para a ativação."),
	(ids::NOT_AUTHENTICATED, "Não autenticado. Ative o aplicativo novamente."),
];

/// Returns the localized message for `identifier`, or `identifier` itself when unmapped.
pub fn translate(identifier: &str) -> &str {
	CATALOG
		.iter()
		.find_map(|(id, text)| (*id == identifier).then_some(*text))
		.unwrap_or(identifier)
}

/// Iterates over every mapped identifier.
pub fn known_identifiers() -> impl Iterator<Item = &'static str> {
	CATALOG.iter().map(|(id, _)| *id)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn known_identifiers_map_to_catalog_entries() {
		for (id, text) in CATALOG {
			assert_eq!(translate(id), *text);
			assert_ne!(translate(id), *id, "Identifier `{id}` must not map to itself.");
		}

		assert_eq!(known_identifiers().count(), CATALOG.len());
	}

	#[test]
	fn unknown_identifiers_pass_through() {
		for raw in ["", "device revoked", "Something else entirely", "Sessão expirada"] {
			assert_eq!(translate(raw), raw);
		}
	}

	#[test]
	fn catalog_identifiers_are_unique() {
		let mut seen = std::collections::HashSet::new();

		for id in known_identifiers() {
			assert!(seen.insert(id), "Duplicate catalog identifier `{id}`.");
		}
	}
}
