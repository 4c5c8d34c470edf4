// src/common/i18n.rs

// Catálogo de mensagens do proxy. O espanhol é o idioma padrão do painel.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    Es,
    En,
    Ca,
    Pt,
}

impl Lang {
    /// Converte a etiqueta primária ("pt", "en", ...) num idioma suportado.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "es" => Some(Lang::Es),
            "en" => Some(Lang::En),
            "ca" => Some(Lang::Ca),
            "pt" => Some(Lang::Pt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    MissingToken,
    InvalidFields,
    InvalidPayload,
    UnknownRole,
    BackendUnreachable,
    UnexpectedPayload,
    Internal,

    // Fallbacks quando o backend não envia mensagem
    SignInFailed,
    SignUpFailed,
    LogoutFailed,
    ProfileFailed,
    FetchFailed,
    SaveFailed,
    DeleteFailed,
    RoleUpdateFailed,

    // Mensagens de sucesso dos endpoints de autenticação
    SignInOk,
    SignUpOk,
    LogoutOk,
    ProfileOk,
}

pub fn translate(lang: Lang, key: MessageKey) -> &'static str {
    use MessageKey::*;

    match (lang, key) {
        (Lang::Es, MissingToken) => "Token de autorización requerido",
        (Lang::En, MissingToken) => "Authorization token required",
        (Lang::Ca, MissingToken) => "Cal un token d'autorització",
        (Lang::Pt, MissingToken) => "Token de autorização obrigatório",

        (Lang::Es, InvalidFields) => "Uno o más campos no son válidos.",
        (Lang::En, InvalidFields) => "One or more fields are invalid.",
        (Lang::Ca, InvalidFields) => "Un o més camps no són vàlids.",
        (Lang::Pt, InvalidFields) => "Um ou mais campos são inválidos.",

        (Lang::Es, InvalidPayload) => "El cuerpo de la petición no es válido.",
        (Lang::En, InvalidPayload) => "The request body is invalid.",
        (Lang::Ca, InvalidPayload) => "El cos de la petició no és vàlid.",
        (Lang::Pt, InvalidPayload) => "O corpo da requisição é inválido.",

        (Lang::Es, UnknownRole) => "Rol desconocido.",
        (Lang::En, UnknownRole) => "Unknown role.",
        (Lang::Ca, UnknownRole) => "Rol desconegut.",
        (Lang::Pt, UnknownRole) => "Cargo desconhecido.",

        (Lang::Es, BackendUnreachable) => "Error al conectar con el servidor.",
        (Lang::En, BackendUnreachable) => "Could not connect to the server.",
        (Lang::Ca, BackendUnreachable) => "Error en connectar amb el servidor.",
        (Lang::Pt, BackendUnreachable) => "Erro ao conectar com o servidor.",

        (Lang::Es, UnexpectedPayload) => "Respuesta inesperada del servidor.",
        (Lang::En, UnexpectedPayload) => "Unexpected response from the server.",
        (Lang::Ca, UnexpectedPayload) => "Resposta inesperada del servidor.",
        (Lang::Pt, UnexpectedPayload) => "Resposta inesperada do servidor.",

        (Lang::Es, Internal) => "Ocurrió un error inesperado.",
        (Lang::En, Internal) => "An unexpected error occurred.",
        (Lang::Ca, Internal) => "S'ha produït un error inesperat.",
        (Lang::Pt, Internal) => "Ocorreu um erro inesperado.",

        (Lang::Es, SignInFailed) => "Error al iniciar sesión",
        (Lang::En, SignInFailed) => "Sign-in failed",
        (Lang::Ca, SignInFailed) => "Error en iniciar la sessió",
        (Lang::Pt, SignInFailed) => "Erro ao iniciar sessão",

        (Lang::Es, SignUpFailed) => "Error en el registro",
        (Lang::En, SignUpFailed) => "Sign-up failed",
        (Lang::Ca, SignUpFailed) => "Error en el registre",
        (Lang::Pt, SignUpFailed) => "Erro no cadastro",

        (Lang::Es, LogoutFailed) => "Error al cerrar sesión",
        (Lang::En, LogoutFailed) => "Logout failed",
        (Lang::Ca, LogoutFailed) => "Error en tancar la sessió",
        (Lang::Pt, LogoutFailed) => "Erro ao encerrar sessão",

        (Lang::Es, ProfileFailed) => "Error al obtener el perfil",
        (Lang::En, ProfileFailed) => "Could not load the profile",
        (Lang::Ca, ProfileFailed) => "Error en obtenir el perfil",
        (Lang::Pt, ProfileFailed) => "Erro ao obter o perfil",

        (Lang::Es, FetchFailed) => "Error al obtener los datos",
        (Lang::En, FetchFailed) => "Could not fetch the data",
        (Lang::Ca, FetchFailed) => "Error en obtenir les dades",
        (Lang::Pt, FetchFailed) => "Erro ao obter os dados",

        (Lang::Es, SaveFailed) => "Error al guardar los datos",
        (Lang::En, SaveFailed) => "Could not save the data",
        (Lang::Ca, SaveFailed) => "Error en desar les dades",
        (Lang::Pt, SaveFailed) => "Erro ao salvar os dados",

        (Lang::Es, DeleteFailed) => "Error al eliminar el registro",
        (Lang::En, DeleteFailed) => "Could not delete the record",
        (Lang::Ca, DeleteFailed) => "Error en eliminar el registre",
        (Lang::Pt, DeleteFailed) => "Erro ao excluir o registro",

        (Lang::Es, RoleUpdateFailed) => "Error al actualizar el rol",
        (Lang::En, RoleUpdateFailed) => "Could not update the role",
        (Lang::Ca, RoleUpdateFailed) => "Error en actualitzar el rol",
        (Lang::Pt, RoleUpdateFailed) => "Erro ao atualizar o cargo",

        (Lang::Es, SignInOk) => "Inicio de sesión exitoso",
        (Lang::En, SignInOk) => "Signed in successfully",
        (Lang::Ca, SignInOk) => "Sessió iniciada correctament",
        (Lang::Pt, SignInOk) => "Sessão iniciada com sucesso",

        (Lang::Es, SignUpOk) => "Registro exitoso",
        (Lang::En, SignUpOk) => "Signed up successfully",
        (Lang::Ca, SignUpOk) => "Registre completat",
        (Lang::Pt, SignUpOk) => "Cadastro realizado com sucesso",

        (Lang::Es, LogoutOk) => "Sesión cerrada",
        (Lang::En, LogoutOk) => "Logged out",
        (Lang::Ca, LogoutOk) => "Sessió tancada",
        (Lang::Pt, LogoutOk) => "Sessão encerrada",

        (Lang::Es, ProfileOk) => "Perfil obtenido",
        (Lang::En, ProfileOk) => "Profile loaded",
        (Lang::Ca, ProfileOk) => "Perfil obtingut",
        (Lang::Pt, ProfileOk) => "Perfil obtido",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_are_case_insensitive() {
        assert_eq!(Lang::from_tag("PT"), Some(Lang::Pt));
        assert_eq!(Lang::from_tag("ca"), Some(Lang::Ca));
        assert_eq!(Lang::from_tag("fr"), None);
    }

    #[test]
    fn spanish_is_the_default() {
        assert_eq!(
            translate(Lang::default(), MessageKey::MissingToken),
            "Token de autorización requerido"
        );
    }
}
