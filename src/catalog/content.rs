//! Shipped content tables for Summan Data Clicker.

use super::{
    AchievementDef, AchievementStat, BuildingDef, InnovationEffect, InnovationUpgradeDef,
    Requirements, UpgradeDef, UpgradeEffect,
};

const GROWTH: f64 = 1.18;

pub fn create_buildings() -> Vec<BuildingDef> {
    // (id, name, base_cost, base_production, unlock_at)
    let rows: [(&'static str, &'static str, f64, f64, f64); 10] = [
        ("intern", "Intern", 20.0, 0.4, 0.0),
        ("laptop", "Laptop", 150.0, 4.0, 100.0),
        ("junior", "Junior Dev", 1_500.0, 35.0, 1_000.0),
        ("senior", "Senior Dev", 15_000.0, 200.0, 10_000.0),
        ("server", "Server", 130_000.0, 1_200.0, 100_000.0),
        ("architect", "Cloud Architect", 1_400_000.0, 6_000.0, 1_000_000.0),
        ("datacenter", "Data Center", 20_000_000.0, 35_000.0, 5_000_000.0),
        ("devops", "DevOps Pipeline", 330_000_000.0, 200_000.0, 50_000_000.0),
        ("ailab", "AI Lab", 5_100_000_000.0, 1_500_000.0, 500_000_000.0),
        ("quantum", "Quantum Computer", 75_000_000_000.0, 10_000_000.0, 5_000_000_000.0),
    ];
    rows.into_iter()
        .map(|(id, name, base_cost, base_production, unlock_at)| BuildingDef {
            id,
            name,
            base_cost,
            base_production,
            growth_rate: GROWTH,
            unlock_at,
        })
        .collect()
}

fn upgrade(
    id: &'static str,
    name: &'static str,
    cost: f64,
    effect: UpgradeEffect,
    requirements: Requirements,
) -> UpgradeDef {
    UpgradeDef {
        id,
        name,
        cost,
        effect,
        requirements,
    }
}

fn building_upgrade(
    id: &'static str,
    name: &'static str,
    cost: f64,
    target: &'static str,
    multiplier: f64,
    required: u64,
) -> UpgradeDef {
    upgrade(
        id,
        name,
        cost,
        UpgradeEffect::BuildingMultiplier { target, multiplier },
        Requirements::building(target, required),
    )
}

pub fn create_upgrades() -> Vec<UpgradeDef> {
    use UpgradeEffect::*;

    vec![
        // Click
        upgrade("click_1", "Reinforced Pointer", 250.0, ClickMultiplier(2.0), Requirements::clicks(100)),
        upgrade("click_2", "Gaming Mouse", 1_000.0, ClickMultiplier(2.0), Requirements::clicks(500)),
        upgrade("click_3", "Mechanical Keyboard", 5_000.0, ClickAdditive(5.0), Requirements::lifetime_data(3_000.0)),
        upgrade("click_4", "Data Precision", 50_000.0, ClickMultiplier(3.0), Requirements::lifetime_data(25_000.0)),
        upgrade("click_5", "Quantum Click", 500_000.0, ClickDpsPercent(0.01), Requirements::lifetime_data(250_000.0)),
        upgrade("click_6", "Super Click", 5_000_000.0, ClickDpsPercent(0.05), Requirements::lifetime_data(2_500_000.0)),
        // Buildings
        building_upgrade("intern_1", "Onboarding Manual", 250.0, "intern", 2.0, 1),
        building_upgrade("intern_2", "Excel Course", 2_500.0, "intern", 2.0, 10),
        building_upgrade("intern_3", "Mentoring Program", 50_000.0, "intern", 3.0, 25),
        building_upgrade("laptop_1", "Extended Battery", 2_500.0, "laptop", 2.0, 1),
        building_upgrade("laptop_2", "SSD Upgrade", 25_000.0, "laptop", 2.0, 10),
        building_upgrade("laptop_3", "Ultra-Wide Monitor", 500_000.0, "laptop", 3.0, 25),
        building_upgrade("junior_1", "Stack Overflow Premium", 11_000.0, "junior", 2.0, 1),
        building_upgrade("junior_2", "Monthly Hackathon", 110_000.0, "junior", 2.0, 10),
        building_upgrade("junior_3", "Intensive Bootcamp", 5_500_000.0, "junior", 3.0, 25),
        building_upgrade("senior_1", "Unlimited Coffee", 120_000.0, "senior", 2.0, 1),
        building_upgrade("senior_2", "Remote Work", 1_200_000.0, "senior", 2.0, 10),
        building_upgrade("senior_3", "Weekly Tech Talks", 60_000_000.0, "senior", 3.0, 25),
        building_upgrade("server_1", "Liquid Cooling", 1_300_000.0, "server", 2.0, 1),
        building_upgrade("server_2", "ISO 27001 Certification", 13_000_000.0, "server", 2.0, 10),
        building_upgrade("architect_1", "AWS Certified", 14_000_000.0, "architect", 2.0, 1),
        building_upgrade("architect_2", "Multi-Cloud Strategy", 140_000_000.0, "architect", 2.0, 10),
        building_upgrade("datacenter_1", "Renewable Energy", 200_000_000.0, "datacenter", 2.0, 1),
        building_upgrade("datacenter_2", "Modular Expansion", 2_000_000_000.0, "datacenter", 2.0, 10),
        building_upgrade("devops_1", "Kubernetes Mastery", 3_300_000_000.0, "devops", 2.0, 1),
        building_upgrade("devops_2", "Advanced GitOps", 33_000_000_000.0, "devops", 2.0, 10),
        building_upgrade("ailab_1", "Next-Gen GPUs", 51_000_000_000.0, "ailab", 2.0, 1),
        building_upgrade("quantum_1", "Stable Qubits", 750_000_000_000.0, "quantum", 2.0, 1),
        // Synergies
        upgrade(
            "syn_1",
            "Pair Programming",
            50_000.0,
            Synergy { targets: &["junior", "senior"], multiplier: 1.5 },
            Requirements::buildings(&[("junior", 5), ("senior", 5)]),
        ),
        upgrade(
            "syn_2",
            "DevOps Culture",
            5_000_000.0,
            BuildingMultiplier { target: "server", multiplier: 2.0 },
            Requirements::building("devops", 1),
        ),
        upgrade(
            "syn_3",
            "Data-Driven Decisions",
            50_000_000.0,
            SynergyPer { target: "ailab", per: "datacenter", value: 0.5 },
            Requirements::building("ailab", 1),
        ),
        // Global
        upgrade("global_1", "Clear KPIs", 10_000.0, GlobalMultiplier(1.10), Requirements::lifetime_data(5_000.0)),
        upgrade("global_2", "Agile Methodology", 100_000.0, GlobalMultiplier(1.25), Requirements::lifetime_data(50_000.0)),
        upgrade("global_3", "Cloud Migration", 1_000_000.0, GlobalMultiplier(1.50), Requirements::lifetime_data(500_000.0)),
        upgrade("global_4", "Zero Trust Architecture", 10_000_000.0, GlobalMultiplier(1.50), Requirements::lifetime_data(5_000_000.0)),
        upgrade("global_5", "Total Automation", 100_000_000.0, GlobalMultiplier(2.0), Requirements::lifetime_data(50_000_000.0)),
        upgrade("global_6", "Complete Digital Transformation", 1_000_000_000.0, GlobalMultiplier(3.0), Requirements::lifetime_data(500_000_000.0)),
    ]
}

fn achievement(
    id: &'static str,
    name: &'static str,
    stat: AchievementStat,
    threshold: f64,
    bonus: f64,
) -> AchievementDef {
    AchievementDef {
        id,
        name,
        stat,
        threshold,
        bonus,
    }
}

pub fn create_achievements() -> Vec<AchievementDef> {
    use AchievementStat::*;

    vec![
        achievement("prod_1", "First Report", LifetimeData, 100.0, 0.01),
        achievement("prod_2", "Jr Data Analyst", LifetimeData, 1_000.0, 0.01),
        achievement("prod_3", "Big Data Beginner", LifetimeData, 10_000.0, 0.02),
        achievement("prod_4", "Data Engineer", LifetimeData, 100_000.0, 0.02),
        achievement("prod_5", "Data Lake", LifetimeData, 1e6, 0.03),
        achievement("prod_6", "Data Ocean", LifetimeData, 1e7, 0.03),
        achievement("prod_7", "Data Universe", LifetimeData, 1e8, 0.05),
        achievement("prod_8", "Data Singularity", LifetimeData, 1e9, 0.05),
        achievement("prod_9", "Digital Omniscience", LifetimeData, 1e11, 0.10),
        achievement("click_1", "Click Click", Clicks, 100.0, 0.01),
        achievement("click_2", "Carpal Tunnel Incoming", Clicks, 1_000.0, 0.01),
        achievement("click_3", "Extreme Speed", Clicks, 5_000.0, 0.02),
        achievement("click_4", "The Tireless Finger", Clicks, 10_000.0, 0.03),
        achievement("click_5", "RIP Mouse", Clicks, 50_000.0, 0.05),
        achievement("build_1", "First Hire", AnyBuilding, 1.0, 0.01),
        achievement("build_2", "Startup", TotalBuildings, 10.0, 0.01),
        achievement("build_3", "Scale-up", TotalBuildings, 50.0, 0.02),
        achievement("build_4", "Corporation", TotalBuildings, 100.0, 0.03),
        achievement("build_5", "Global Enterprise", TotalBuildings, 200.0, 0.05),
        achievement("build_6", "Intern Army", Building("intern"), 50.0, 0.02),
        achievement("build_7", "The Future is Now", Building("quantum"), 1.0, 0.05),
        achievement("speed_1", "First Milestone", Dps, 100.0, 0.02),
        achievement("speed_2", "Warp Speed", Dps, 10_000.0, 0.03),
        achievement("speed_3", "Light Speed", Dps, 1e6, 0.05),
        achievement("special_1", "First Innovation", TimesPrestiged, 1.0, 0.05),
    ]
}

pub fn create_innovation_upgrades() -> Vec<InnovationUpgradeDef> {
    use InnovationEffect::*;

    let rows: [(&'static str, &'static str, u64, InnovationEffect); 7] = [
        ("p_start_bonus", "Welcome Kit", 1, StartBonus(100.0)),
        ("p_click_boost", "Muscle Memory", 2, ClickMultiplier(2.0)),
        ("p_production_1", "Accumulated Expertise", 3, ProductionMultiplier(1.25)),
        ("p_building_discount", "Expert Negotiation", 7, BuildingDiscount(0.90)),
        ("p_production_2", "Summan Speed", 10, ProductionMultiplier(2.0)),
        ("p_production_3", "Operational Excellence", 25, ProductionMultiplier(3.0)),
        ("p_start_big", "Seed Investment", 50, StartBonus(1_000_000.0)),
    ];
    rows.into_iter()
        .map(|(id, name, cost, effect)| InnovationUpgradeDef {
            id,
            name,
            cost,
            effect,
        })
        .collect()
}
