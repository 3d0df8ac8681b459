//! Daily log (diário de bordo) vocabulary and validation.
//!
//! A daily log records one support session: the shift(s) it covered, the
//! kind of activity, and free-text notes on difficulties, actions taken and
//! who took part.

/// Shifts a session may cover. A log may span several.
pub const SHIFTS: &[&str] = &["Manhã", "Tarde", "Integral", "Noite"];

/// Separator used to store multiple shifts in a single text column.
pub const SHIFT_SEPARATOR: &str = ", ";

pub const MAX_DIFFICULTIES_LENGTH: usize = 1000;
pub const MAX_ACTIONS_TAKEN_LENGTH: usize = 1000;
pub const MAX_PARTICIPANTS_LENGTH: usize = 500;

/// Activity types as `(key, label)` pairs. Keys are stored; labels are shown.
pub const ACTIVITY_CHOICES: &[(&str, &str)] = &[
    ("adaptacao_braille", "Adaptação de textos para transcrição Braille"),
    ("transcricao_braille", "Transcrição de textos para Sistema Braille"),
    ("revisao_braille", "Revisão de textos em Braille"),
    ("conducao_sala", "Condução a salas de aula"),
    ("conducao_laboratorio", "Condução ao laboratório"),
    ("conducao_evento", "Condução a evento"),
    ("acomp_aulas_vagas", "Acompanhamento em aulas vagas"),
    ("acomp_banheiro", "Acompanhamento ao banheiro"),
    ("acomp_visita_tecnica", "Acompanhamento a visita técnica"),
    ("acomp_setores", "Acompanhamento a setores da instituição"),
    ("auxilio_higiene", "Auxílio na higiene pessoal"),
    ("atividades_extras", "Acompanhamento em atividades extraescolares"),
    ("sala_recursos", "Atendimento na Sala de Recursos Multifuncionais"),
    ("nucleo_aprendizagem", "Acompanhamento no Núcleo de Aprendizagem"),
    ("monitoria_pedagogica", "Acompanhamento ou mediação pedagógica na monitoria"),
    ("sala_aula", "Acompanhamento pedagógico em sala de aula"),
    ("biblioteca", "Atendimento Educacional Especializado (Biblioteca)"),
    ("leitura_material", "Leitura de material para o estudante"),
    ("elaboracao_atividades", "Elaboração de atividades para o estudante"),
    ("orientacoes_estudo", "Orientações básicas para estudos"),
    ("desenvolvimento_leitura", "Atividades para o desenvolvimento da leitura"),
    ("escrita", "Aplicação de atividades para escrita"),
    ("logico_matematica", "Aplicação de atividades lógico-matemáticas"),
    ("descricao_multimidia", "Descrições (filme, imagem, gráfico, situações, etc)"),
    ("relatorios", "Elaboração de relatórios"),
    ("planejamento_estudos", "Planejamento/Pesquisas/Estudos na área de atuação"),
    ("construcao_jogos", "Elaboração e construção de jogos pedagógicos"),
    ("analise_fichas", "Análise de fichas cadastrais"),
    ("reunioes_familia", "Reunião com a família"),
    ("pareceres_psicopedagogicos", "Pareceres psicopedagogicos"),
    ("linhas_intervencao", "Planejamento de linhas interventivas"),
    ("atendimento_estudante", "Atendimento individualizado com o estudante"),
    ("atendimento_docente", "Atendimento individualizado com o docente"),
    ("atendimento_braille", "Atendimento individualizado com transcritor(a) Braille"),
    ("atendimento_vedor", "Atendimento individualizado com ledor(a)"),
    ("atendimento_alfabetizador", "Atendimento individualizado com alfabetizador(a)"),
    ("atendimento_cuidador", "Atendimento individualizado com cuidador(a)"),
    ("atendimento_libras", "Atendimento individualizado com intérprete LIBRAS"),
    ("comunicacao_psicologo", "Comunicação com psicólogo"),
    ("comunicacao_pedagogo", "Comunicação com pedagogo"),
    ("comunicacao_tae", "Comunicação com TAE"),
    ("resolucao_setor", "Resoluções com coordenação de setor"),
    ("impressao_braille", "Impressão Braille"),
    ("apoio_intervalos", "Apoio nos intervalos (lanches e almoço)"),
    ("conducao_auditorio", "Condução ao auditório"),
];

/// Look up the display label for an activity key.
pub fn activity_label(key: &str) -> Option<&'static str> {
    ACTIVITY_CHOICES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
}

/// Validate that `key` is a known activity type.
pub fn validate_activity(key: &str) -> Result<(), String> {
    match activity_label(key) {
        Some(_) => Ok(()),
        None => Err(format!("Invalid activity type '{key}'")),
    }
}

/// Validate and join the selected shifts into their stored form.
///
/// At least one shift is required; duplicates are dropped and the result
/// follows the order of [`SHIFTS`].
pub fn join_shifts(selected: &[String]) -> Result<String, String> {
    if selected.is_empty() {
        return Err("At least one shift must be selected".to_string());
    }
    if let Some(unknown) = selected.iter().find(|s| !SHIFTS.contains(&s.as_str())) {
        return Err(format!(
            "Invalid shift '{unknown}'. Must be one of: {}",
            SHIFTS.join(", ")
        ));
    }
    let joined: Vec<&str> = SHIFTS
        .iter()
        .copied()
        .filter(|shift| selected.iter().any(|s| s == shift))
        .collect();
    Ok(joined.join(SHIFT_SEPARATOR))
}

/// Split a stored shift column back into its parts.
pub fn split_shifts(stored: &str) -> Vec<&str> {
    stored
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Validate optional free-text fields against their length limits.
pub fn validate_notes(
    difficulties: Option<&str>,
    actions_taken: Option<&str>,
    participants: Option<&str>,
) -> Result<(), String> {
    let checks = [
        ("difficulties", difficulties, MAX_DIFFICULTIES_LENGTH),
        ("actions_taken", actions_taken, MAX_ACTIONS_TAKEN_LENGTH),
        ("participants", participants, MAX_PARTICIPANTS_LENGTH),
    ];
    for (field, value, max) in checks {
        if value.is_some_and(|v| v.chars().count() > max) {
            return Err(format!("{field} exceeds maximum length of {max} characters"));
        }
    }
    Ok(())
}
